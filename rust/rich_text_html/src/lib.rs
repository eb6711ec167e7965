//! Conversion between rich-text editor HTML and spreadsheet rich text.
//!
//! [`html_to_rich_text`] turns an HTML fragment into ordered styled runs
//! ready for a cell; [`rich_text_to_html`] renders runs read back from a
//! cell as `<p>` blocks for the editor. Both are pure and infallible.
//!
//! ```
//! use rich_text_html::{html_to_rich_text, rich_text_to_html};
//!
//! let cell = html_to_rich_text("<p><b>Scope 1</b> emissions</p>");
//! assert_eq!(rich_text_to_html(&cell), "<p><strong>Scope 1</strong> emissions</p>");
//! ```

pub mod color;
mod dom;
pub mod error;
pub mod escape;
pub mod html_to_runs;
pub mod model;
pub mod runs_to_html;
mod style;

pub use error::{Error, Result};
pub use html_to_runs::html_to_rich_text;
pub use model::{CellText, RichText, RunStyle, TextRun};
pub use runs_to_html::rich_text_to_html;
