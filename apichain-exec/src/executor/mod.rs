mod chain;
pub mod events;
pub mod http;
pub mod request;
pub mod response;
mod result;
pub mod state;
mod types;

pub use chain::ChainExecutor;
pub use events::{Event, EventSink, NoOpEventSink, TracingEventSink};
pub use http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient, DEFAULT_USER_AGENT};
pub use request::RequestError;
pub use result::{ExecutionError, StepFailure};
pub use state::{ChainEvent, ChainState};
pub use types::{ApiTestResponse, ExecutorConfig};
