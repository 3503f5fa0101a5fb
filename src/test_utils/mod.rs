#![allow(missing_docs)]

pub(crate) mod expense;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use expense::{alert_message, expense_rows, total_text};
pub(crate) use form::{assert_form_input, assert_form_input_with_value, assert_hx_endpoint, must_get_form};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, get_header};
