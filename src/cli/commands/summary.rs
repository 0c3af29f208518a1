use crate::{
    cli::{
        core::{CommandResult, ShellContext},
        io,
        output::{self, section as output_section},
        registry::CommandEntry,
    },
    core::services::SummaryService,
};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Show totals and the expense breakdown",
        "summary",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let active = context.active_context();
    let transactions = context.store.transactions();
    let currency = &context.config.currency;
    let stats = SummaryService::totals(transactions, active);

    output_section(format!("{} summary", active));
    io::print_info(format!(
        "  Total Income    : {}",
        output::amount(&currency.format(stats.total_income), true)
    ));
    io::print_info(format!(
        "  Total Expenses  : {}",
        output::amount(&currency.format(stats.total_expense), false)
    ));
    io::print_info(format!(
        "  Current Balance : {}",
        output::amount(&currency.format(stats.balance), stats.balance >= 0.0)
    ));

    output_section("Expense breakdown");
    let breakdown = SummaryService::category_breakdown(transactions, active);
    if breakdown.is_empty() {
        io::print_info("  No expenses recorded yet.");
        return Ok(());
    }
    for slice in &breakdown {
        let share = if stats.total_expense > 0.0 {
            slice.value / stats.total_expense * 100.0
        } else {
            0.0
        };
        io::print_info(format!(
            "  {} {:<18} {:>14} {:>5.1}%",
            output::swatch(slice.color),
            slice.name,
            currency.format(slice.value),
            share
        ));
    }
    Ok(())
}
