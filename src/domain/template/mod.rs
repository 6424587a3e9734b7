// Template module for `{param}` path templates
//
// Templates are parsed once when the API specification is loaded. Matching and
// list expansion work on the parsed parts.

mod ast;
mod parser;

pub use ast::{PathTemplate, TemplatePart};
pub use parser::TemplateParser;
