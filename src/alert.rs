//! Alert system for displaying success and error messages to users.
//!
//! Alerts are transient: they fade out on their own after a few seconds and can
//! also be dismissed by hand. They are rendered into the `#alert-container`
//! element, either as the target of a failed HTMX request or through an
//! out-of-band swap alongside a successful response.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// The ID of the element that alerts and confirmation prompts are rendered into.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// A notification shown to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An action succeeded.
    SuccessSimple { message: String },
    /// An action failed, with details on how to fix it.
    Error { message: String, details: String },
    /// An action failed.
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (is_success, message, details) = match self {
            Alert::SuccessSimple { message } => (true, message, String::new()),
            Alert::Error { message, details } => (false, message, details),
            Alert::ErrorSimple { message } => (false, message, String::new()),
        };

        let style = if is_success {
            "text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        } else {
            "text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        };

        html! {
            div
                role="alert"
                data-alert-type=(if is_success { "success" } else { "error" })
                class={ "alert-transient flex items-start justify-between gap-4 p-4 mb-4 border rounded " (style) }
            {
                div
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        span class="text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                    class="bg-transparent border-none cursor-pointer"
                {
                    "✕"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

/// Replace the contents of the alert container through an HTMX out-of-band
/// swap. Passing `None` clears the container.
pub fn alert_oob(alert: Option<Alert>) -> Markup {
    html! {
        div id=(ALERT_CONTAINER_ID) hx-swap-oob="innerHTML"
        {
            @if let Some(alert) = alert {
                (alert.into_html())
            }
        }
    }
}

/// A yes/no prompt that must be answered before a destructive action runs.
///
/// Choosing yes sends a DELETE request to `confirm_url` and swaps the
/// response into `target` (replacing the target element). Choosing no
/// removes the prompt without sending anything.
pub fn confirmation_prompt(message: &str, confirm_url: &str, target: &str) -> Markup {
    html! {
        div
            role="alertdialog"
            data-confirm-dialog="true"
            class="p-4 mb-4 border rounded text-gray-900 bg-white border-gray-300 \
                dark:bg-gray-800 dark:text-white dark:border-gray-600 shadow"
        {
            p class="font-medium mb-3" { (message) }

            div class="flex gap-4 justify-end"
            {
                button
                    type="button"
                    hx-delete=(confirm_url)
                    hx-target=(target)
                    hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                    hx-swap="outerHTML"
                    class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded"
                {
                    "Yes"
                }

                button
                    type="button"
                    onclick="this.closest('[data-confirm-dialog]').remove()"
                    class="px-4 py-2 bg-gray-200 hover:bg-gray-300 text-gray-900 rounded \
                        dark:bg-gray-700 dark:text-white"
                {
                    "No"
                }
            }
        }
    }
}
