// PHI audit: static analysis tests that scan every Rust source file for
// tracing calls naming patient data. Logs may carry opaque audit ids, the
// redacted reference, risk level and score; nothing else about a patient.
