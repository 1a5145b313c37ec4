// Pass-through endpoints: the browser-facing JSON API in front of the search backend.
// No validation, no retry; every failure is flattened to a generic message.

pub mod handlers;
