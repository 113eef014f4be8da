//! Annotate SVG text labels with balloon tooltips and hyperlinks.
//!
//! This crate takes an SVG export (typically from a mind-mapping tool),
//! keeps a TOML table of per-label annotations next to it, and rewrites the
//! document so each annotated label shows a hover tooltip and/or links to a
//! URL. Optional caption lines can be appended below the graphic.
//!
//! The binary `svgballoon` drives the full pass; see [`cli::annotate_file`].

pub mod caption;
pub mod cli;
pub mod config;
pub mod dom;
pub mod html;
pub mod parser;
pub mod reconcile;
pub mod rewrite;
pub mod store;
pub mod style;
pub mod writer;
