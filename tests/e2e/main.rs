// End-to-end tests for the Voicebox backend API.
//
// The router is driven in-process via `tower::ServiceExt::oneshot`, wired to
// either no engine (the failed-load path) or a recording wrapper around the
// mock backend, so tests can assert on invocation counts and on the
// reference-clip temp file lifecycle without any network or model weights.

mod test_generate;
