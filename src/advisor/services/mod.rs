//! Application services for advisor registration.

mod command_line;
mod registry;

pub use command_line::split_command_line;
pub use registry::{
    AdvisorRegistryService, AdvisorRegistryServiceError, AdvisorRegistryServiceResult,
    RegisterAdvisorRequest,
};
