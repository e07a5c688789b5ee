//! Integration tests for kbdocs-api
//!
//! Uses wiremock to simulate the AnythingLLM API and verifies end-to-end
//! behavior of the client, the endpoint modules and the store adapter.

mod common;

mod test_documents;
mod test_folders;
mod test_import_flow;
mod test_upload;
