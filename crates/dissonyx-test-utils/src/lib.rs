//! dissonyx-test-utils — shared test fixtures for the Dissonyx workspace.
