// Strategy generation: input resolution, the completion request, and the
// submission pipeline that ties extraction, assembly and rendering together.
// All LLM calls go through llm_client; no direct provider calls here.

pub mod handlers;
pub mod pipeline;
pub mod requester;
