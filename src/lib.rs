//! skillprompts - Rewrite the prompts of a studio agent skill catalog
//!
//! Every skill record in a JSON catalog gets its `prompt` regenerated from a
//! shared studio preamble plus a per-skill block chosen by a fixed rule order
//! (curated prompts, question packs, key families, stage defaults, generic).
//! All other record fields are written back untouched. Rewritten catalogs
//! can be split into global, per-stage and per-skill parts, checked for
//! stale prompts, or built from a Markdown skill book.

pub mod catalog;
pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod resolver;
pub mod split;
