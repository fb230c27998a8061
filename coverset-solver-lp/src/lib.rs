//! `good_lp` backend for the coverset model layer.
//!
//! This crate provides [`GoodLpBackend`], an implementation of
//! [`ModelBackend`](coverset_core::model::ModelBackend) that translates a
//! [`LinearModel`](coverset_core::model::LinearModel) into a `good_lp`
//! problem and solves it with the pure-Rust `microlp` engine. It powers the
//! LP-relaxation, exact ILP and tradeoff solvers of `coverset-core`.
//!
//! `microlp` runs to completion with no time limit, so this backend never
//! reports [`BackendError::TimedOut`](coverset_core::model::BackendError).

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod backend;

pub use backend::GoodLpBackend;
