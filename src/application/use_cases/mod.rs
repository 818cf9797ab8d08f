/// Use cases module containing application business logic orchestration
mod convert_advisory;

pub use convert_advisory::ConvertAdvisoryUseCase;
