// Session store — external collaborator from the workflow's perspective.
// Mocked-permissive like the reference client (any credentials mint a
// Free-plan user), but injected explicitly rather than read as ambient state.

pub mod handlers;
pub mod store;

pub use store::AuthStore;
