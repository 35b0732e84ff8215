//! Workspace root package; exists only for workspace-level tooling (pre-commit hooks).
