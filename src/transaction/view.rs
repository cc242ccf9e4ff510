//! HTML rendering for the ledger page.

use maud::{Markup, html};
use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency, format_signed_currency,
    },
};

use super::{
    filter::{MonthFilter, Summary},
    model::TransactionKind,
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The number of years before the current year offered by the year selector.
const YEARS_BEFORE_CURRENT: i32 = 10;
/// The number of years after the current year offered by the year selector.
const YEARS_AFTER_CURRENT: i32 = 5;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// The display data for one row of the transaction table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionTableRow {
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: Option<String>,
    pub date: Date,
    pub delete_url: String,
}

/// The query string selecting `filter`, e.g. `year=2024&month=3`.
pub(crate) fn filter_query_string(filter: MonthFilter) -> String {
    serde_urlencoded::to_string([
        ("year", filter.year.to_string()),
        ("month", u8::from(filter.month).to_string()),
    ])
    .unwrap_or_default()
}

fn filter_href(filter: MonthFilter) -> String {
    format!("{}?{}", endpoints::LEDGER_VIEW, filter_query_string(filter))
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

const DATE_ATTRIBUTE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

fn date_attribute_value(date: Date) -> String {
    date.format(DATE_ATTRIBUTE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn display_description(description: Option<&str>) -> (String, Option<&str>) {
    let description = match description {
        Some(description) if !description.is_empty() => description,
        _ => return ("-".to_owned(), None),
    };

    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}

fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "text-green-700 dark:text-green-300",
        TransactionKind::Expense => "text-red-700 dark:text-red-300",
    }
}

/// Render the full ledger page for the month selected by `filter`.
///
/// `rows` must already be filtered to that month and sorted for display.
pub(crate) fn ledger_view(
    filter: MonthFilter,
    today: Date,
    rows: &[TransactionTableRow],
    summary: Summary,
) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-3xl space-y-6"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Tallybook" }
                }

                section class="rounded bg-gray-50 dark:bg-gray-800 p-4"
                {
                    h2 class="mb-4 font-semibold" { "Add Transaction" }
                    (add_transaction_form(filter, today))
                }

                (filter_controls(filter, today))

                (summary_section(summary, false))

                section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class="px-6 py-4 text-right" { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (transaction_row_view(row))
                            }

                            @if rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No transactions in "
                                        (month_name(filter.month)) " " (filter.year) "."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Ledger", &content)
}

fn add_transaction_form(filter: MonthFilter, today: Date) -> Markup {
    let post_url = format!(
        "{}?{}",
        endpoints::TRANSACTIONS_API,
        filter_query_string(filter)
    );

    html! {
        form
            hx-post=(post_url)
            hx-target="#alert-container"
            hx-swap="innerHTML"
            class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4 items-end"
        {
            div
            {
                label for="kind" class=(FORM_LABEL_STYLE) { "Type" }
                select id="kind" name="kind" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="income" { "Income" }
                    option value="expense" { "Expense" }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    id="amount"
                    name="amount"
                    type="text"
                    inputmode="decimal"
                    placeholder="0.00"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                input
                    id="description"
                    name="description"
                    type="text"
                    placeholder="e.g. Groceries"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    id="date"
                    name="date"
                    type="date"
                    value=(date_attribute_value(today))
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="sm:col-span-2 lg:col-span-4"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Transaction" }
            }
        }
    }
}

fn filter_controls(filter: MonthFilter, today: Date) -> Markup {
    let year_options = (today.year() - YEARS_BEFORE_CURRENT)..=(today.year() + YEARS_AFTER_CURRENT);

    html! {
        nav class="flex items-center justify-between w-full gap-3 flex-wrap"
        {
            a href=(filter_href(filter.previous())) class=(LINK_STYLE) { "Previous" }

            form
                method="get"
                action=(endpoints::LEDGER_VIEW)
                class="flex items-center gap-2"
            {
                label for="month" class="sr-only" { "Month" }
                select
                    id="month"
                    name="month"
                    class=(FORM_TEXT_INPUT_STYLE)
                    onchange="this.form.submit()"
                {
                    @for month in MONTHS {
                        option value=(u8::from(month)) selected[month == filter.month]
                        {
                            (month_name(month))
                        }
                    }
                }

                label for="year" class="sr-only" { "Year" }
                select
                    id="year"
                    name="year"
                    class=(FORM_TEXT_INPUT_STYLE)
                    onchange="this.form.submit()"
                {
                    @for year in year_options {
                        option value=(year) selected[year == filter.year] { (year) }
                    }
                }
            }

            a href=(filter_href(filter.next())) class=(LINK_STYLE) { "Next" }
        }
    }
}

/// Render the income, expenses and balance totals.
///
/// The section keeps a stable element ID so delete responses can refresh it
/// with an out-of-band swap, set `oob` for those responses.
pub(crate) fn summary_section(summary: Summary, oob: bool) -> Markup {
    let balance_class = if summary.balance < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    };

    html! {
        section
            id="ledger-summary"
            hx-swap-oob=[oob.then_some("outerHTML")]
            class="rounded bg-gray-50 dark:bg-gray-800 p-4"
        {
            dl class="grid grid-cols-3 gap-4 text-center"
            {
                div
                {
                    dt class="text-sm text-gray-500 dark:text-gray-400" { "Income" }
                    dd
                        data-total-income="true"
                        class="font-semibold text-green-700 dark:text-green-300"
                    {
                        (format_currency(summary.total_income))
                    }
                }

                div
                {
                    dt class="text-sm text-gray-500 dark:text-gray-400" { "Expenses" }
                    dd
                        data-total-expense="true"
                        class="font-semibold text-red-700 dark:text-red-300"
                    {
                        (format_currency(summary.total_expense))
                    }
                }

                div
                {
                    dt class="text-sm text-gray-500 dark:text-gray-400" { "Balance" }
                    dd data-balance="true" class={ "font-semibold " (balance_class) }
                    {
                        (format_currency(summary.balance))
                    }
                }
            }
        }
    }
}

fn transaction_row_view(row: &TransactionTableRow) -> Markup {
    let (description, tooltip) = display_description(row.description.as_deref());
    let confirm_message = format!(
        "Are you sure you want to delete the transaction '{description}'? This cannot be undone."
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(date_attribute_value(row.date)) { (row.date) }
            }
            td class=(TABLE_CELL_STYLE) { (row.kind.label()) }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class={ "px-6 py-4 text-right " (amount_class(row.kind)) }
            {
                (format_signed_currency(row.kind, row.amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(row.delete_url)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-confirm=(confirm_message)
                {
                    "Delete"
                }
            }
        }
    }
}
