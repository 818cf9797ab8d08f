/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the conversion core isolated.
mod conversion_request;
mod conversion_response;

pub use conversion_request::ConversionRequest;
pub use conversion_response::ConversionResponse;
