//! Crate-level tests: full-stack flows against a mocked backend, plus
//! opt-in tests against a live Proxmox host.
