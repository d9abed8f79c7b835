//! Build orchestration for helpdocs.
//!
//! [`SiteBuilder`] runs the page loop for the web and embedded help targets
//! and writes the search outputs. [`PrintCompiler`] joins the pages into one
//! markdown document for an external print converter, keeping link names
//! unique through a [`CompilationContext`].

mod builder;
mod command;
mod error;
mod links;
mod print;
mod progress;
mod source;
mod template;

pub use builder::{BuildSummary, FULL_INDEX_FILE, SEARCH_INDEX_FILE, SiteBuilder};
pub use command::CommandConverter;
pub use error::BuildError;
pub use links::{CompilationContext, fix_local_links, link_name};
pub use print::{COMPILED_FILE, PrintCompiler, PrintOutput, finish_document, print_page};
pub use progress::{Progress, ProgressFn};
pub use source::{WikiLinks, fill_title, print_title};
