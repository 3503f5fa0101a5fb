use scraper::{ElementRef, Html, Selector};

/// The table rows that show an expense, in display order.
pub(crate) fn expense_rows(html: &Html) -> Vec<ElementRef<'_>> {
    html.select(&Selector::parse("tr[data-expense-id]").unwrap())
        .collect()
}

/// The text of the total element.
#[track_caller]
pub(crate) fn total_text(html: &Html) -> String {
    html.select(&Selector::parse("#total-amount").unwrap())
        .next()
        .expect("No total found")
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}

/// The message of the first alert.
#[track_caller]
pub(crate) fn alert_message(html: &Html) -> String {
    html.select(&Selector::parse("[role=alert] p").unwrap())
        .next()
        .expect("No alert found")
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}
