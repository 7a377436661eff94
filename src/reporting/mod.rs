pub mod report;

pub use report::{
    journeys_at_least_duration, journeys_in_speed_range, BatchReport, DriverTotal, QueryOutcome,
    NO_JOURNEYS_MESSAGE, NO_MATCHES_MESSAGE,
};
