use crate::error::{ProcessingError, Result};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a batch file into its non-blank lines, in file order.
pub struct LineReader {
    skip_header: bool,
    use_mmap: bool,
}

impl LineReader {
    pub fn new() -> Self {
        Self {
            skip_header: false,
            use_mmap: false,
        }
    }

    pub fn with_skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let lines = if self.use_mmap {
            self.read_lines_mmap(path)?
        } else {
            self.read_lines_buffered(path)?
        };

        tracing::debug!(path = %path.display(), lines = lines.len(), "Read batch file");
        Ok(lines)
    }

    /// Read lines using buffered I/O
    fn read_lines_buffered(&self, path: &Path) -> Result<Vec<String>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);

        let mut lines = Vec::new();
        for line_result in reader.lines() {
            lines.push(line_result?);
        }

        Ok(self.keep_data_lines(lines))
    }

    /// Read lines using memory-mapped I/O for large files
    fn read_lines_mmap(&self, path: &Path) -> Result<Vec<String>> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Vec::new());
        }

        // SAFETY: the mapping is read-only and dropped before this function returns.
        let mmap = unsafe { Mmap::map(&file)? };
        let content = std::str::from_utf8(&mmap)
            .map_err(|e| ProcessingError::InvalidFormat(format!("Invalid UTF-8: {}", e)))?;

        Ok(self.keep_data_lines(content.lines().map(str::to_string)))
    }

    fn keep_data_lines<I>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let header_lines = usize::from(self.skip_header);

        lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .skip(header_lines)
            .collect()
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn batch_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "journeyId,driverId,start,end,sLat,sLon,eLat,eLon,sOdo,eOdo").unwrap();
        writeln!(file, "J1,D1,1000,1000000,34.0,-118.0,34.1,-118.1,100.0,150.0").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "J2,D2,1000,2000000,34.0,-118.0,34.1,-118.1,10.0,20.0").unwrap();
        file
    }

    #[test]
    fn test_read_lines_skips_blank_lines() {
        let file = batch_file();
        let lines = LineReader::new().read_lines(file.path()).unwrap();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("journeyId"));
        assert!(lines[2].starts_with("J2"));
    }

    #[test]
    fn test_read_lines_skip_header() {
        let file = batch_file();
        let lines = LineReader::new()
            .with_skip_header(true)
            .read_lines(file.path())
            .unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("J1"));
    }

    #[test]
    fn test_mmap_matches_buffered() {
        let file = batch_file();
        let buffered = LineReader::new().read_lines(file.path()).unwrap();
        let mapped = LineReader::new().with_mmap(true).read_lines(file.path()).unwrap();

        assert_eq!(buffered, mapped);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "J1,D1\r\nJ2,D2\r\n").unwrap();

        let lines = LineReader::new().with_mmap(true).read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["J1,D1".to_string(), "J2,D2".to_string()]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = LineReader::new().read_lines(Path::new("/nonexistent/journeys.csv"));
        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }

    #[test]
    fn test_empty_file_with_mmap() {
        let file = NamedTempFile::new().unwrap();
        let lines = LineReader::new().with_mmap(true).read_lines(file.path()).unwrap();

        assert!(lines.is_empty());
    }
}
