//! Liquid-style directives: `{% name params %}`.
//!
//! # Syntax
//!
//! - **Block**: `{% name params %} body {% endname %}`. Visibility blocks
//!   (`apponly`, `browseronly`, `class`) wrap their body in a classed element;
//!   suppressed blocks (`note`, `notes`, `comment`, `todo`, `fixme`) are
//!   removed together with their body; other blocks are unwrapped.
//! - **Single tag**: `{% name args %}` on one line. `kbd`, `menu`/`appmenu`
//!   and `prefspane`/`prefpane` render inline markup; suppressed names are
//!   removed; anything else is left as written.
//!
//! The [`DirectiveProcessor`] also handles annotation spans, `{{toc}}` markers
//! and `{{token}}` entities, so its output contains no directive syntax.
//!
//! # Example
//!
//! ```
//! use helpdocs_render::RenderTarget;
//! use helpdocs_render::directive::DirectiveProcessor;
//!
//! let mut processor = DirectiveProcessor::new(RenderTarget::Print);
//! let output = processor.process("Choose {% menu File,Export %}.{% note check wording %}");
//! assert_eq!(output, r#"Choose <span class="appmenu">**File** *Export*</span>."#);
//! ```

mod args;
mod block;
mod inline;
mod output;
mod parser;
mod processor;

pub use args::{DirectiveArgs, DirectiveKind};
pub use output::DirectiveOutput;
pub use processor::DirectiveProcessor;
