pub mod job;

pub use job::{
    is_placeholder_description, JobMetadata, JobRecord, FETCH_FAILED_PREFIX, NO_DESCRIPTION,
    NOT_AVAILABLE,
};
