//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod fmt;
pub(crate) mod show;

pub(crate) use check::CheckArgs;
pub(crate) use fmt::FmtArgs;
pub(crate) use show::ShowArgs;
