//! HTML for the expense tracker page and the fragments that HTMX swaps into it.

use maud::{Markup, html};
use time::Date;

use crate::{
    alert::ALERT_CONTAINER_ID,
    endpoints,
    expense::Expense,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        currency_input_styles, format_currency, format_date,
    },
};

/// The ID of the element holding the total and the expense table.
pub const EXPENSES_SECTION_ID: &str = "expenses-section";
/// The ID of the form for adding expenses.
pub const EXPENSE_FORM_ID: &str = "expense-form";
/// The ID of the element showing the total.
pub const TOTAL_AMOUNT_ID: &str = "total-amount";

const EMPTY_STATE_MESSAGE: &str = "No expenses added yet. Add your first expense above!";

pub fn expense_page_view(expenses: &[&Expense], total: f64, today: Date) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-8"
            {
                header
                {
                    h1 class="text-2xl font-bold" { "Expense Tracker" }
                }

                div class="w-full max-w-md mx-auto"
                {
                    (expense_form_view(today, false))
                }

                (expenses_section_view(expenses, total, false))
            }
        }
    };

    base("Expenses", &[currency_input_styles()], &content)
}

/// The form for adding an expense, with the date set to `today`.
///
/// Set `oob` to replace the form already on the page through an out-of-band
/// swap, which clears the inputs after a successful submission.
pub fn expense_form_view(today: Date, oob: bool) -> Markup {
    let target_section = format!("#{EXPENSES_SECTION_ID}");
    let target_error = format!("#{ALERT_CONTAINER_ID}");

    html! {
        form
            id=(EXPENSE_FORM_ID)
            hx-post=(endpoints::EXPENSES_API)
            hx-target=(target_section)
            hx-swap="outerHTML"
            hx-target-error=(target_error)
            hx-swap-oob=[oob.then_some("true")]
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Expense Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="e.g. Groceries"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    id="description"
                    type="text"
                    name="description"
                    placeholder="Optional"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="date"
                    type="date"
                    name="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}

/// The total and the table of expenses.
///
/// `expenses` should already be in display order. Set `pulse` to briefly
/// animate the total after it changes.
pub fn expenses_section_view(expenses: &[&Expense], total: f64, pulse: bool) -> Markup {
    html! {
        section id=(EXPENSES_SECTION_ID) class="space-y-4"
        {
            div class="flex justify-between items-end flex-wrap"
            {
                h2 class="text-xl font-bold" { "Expenses" }

                p class="text-lg"
                {
                    "Total: "
                    span
                        id=(TOTAL_AMOUNT_ID)
                        class=[pulse.then_some("total-pulse")]
                    {
                        (format_currency(total))
                    }
                }
            }

            div class="overflow-x-auto dark:bg-gray-800"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody id="expenses-list"
                    {
                        @for expense in expenses {
                            (expense_row_view(expense))
                        }

                        @if expenses.is_empty() {
                            tr
                            {
                                td
                                    colspan="5"
                                    class="px-6 py-8 text-center text-gray-500 dark:text-gray-400"
                                {
                                    (EMPTY_STATE_MESSAGE)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn expense_row_view(expense: &Expense) -> Markup {
    let delete_url = endpoints::format_endpoint(endpoints::EXPENSE, &expense.id);
    let target_alert = format!("#{ALERT_CONTAINER_ID}");
    let description = if expense.description.is_empty() {
        "-"
    } else {
        expense.description.as_str()
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class=(TABLE_CELL_STYLE) { (expense.name) }
            td class={ (TABLE_CELL_STYLE) " tabular-nums" } { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE) { (description) }
            td class=(TABLE_CELL_STYLE) { (format_date(expense.date)) }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-target=(target_alert)
                    hx-target-error=(target_alert)
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}
