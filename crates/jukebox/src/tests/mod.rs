//! Manager-level tests run against a recording backend and in-memory content

mod support;
