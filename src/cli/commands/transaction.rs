use crate::{
    cli::{
        core::{CliMode, CommandError, CommandResult, ShellContext},
        io,
        output::{self, section as output_section, Alignment, Table},
        registry::CommandEntry,
    },
    core::services::TransactionService,
    currency::CurrencyFormat,
    ledger::{PaymentMethod, Transaction, TransactionType},
};

use super::parse_options;

const ADD_USAGE: &str = "add | add income <amount> [--date YYYY-MM-DD] [--method cash|bank|other] [--note TEXT] | add expense <amount> <category> [--date YYYY-MM-DD] [--note TEXT]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "list",
            "List transactions of the active context",
            "list",
            cmd_list,
        ),
        CommandEntry::new(
            "categories",
            "Show expense categories of the active context",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "delete",
            "Delete a transaction by id or id prefix",
            "delete <id-or-prefix> [--yes]",
            cmd_delete,
        ),
        CommandEntry::new(
            "clear",
            "Delete every transaction in both contexts",
            "clear [--yes]",
            cmd_clear,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return match context.mode {
            CliMode::Interactive => run_add_wizard(context),
            CliMode::Script => Err(CommandError::InvalidArguments(format!(
                "usage: {}",
                ADD_USAGE
            ))),
        };
    }

    let options = parse_options(args, &["--date", "--method", "--note"], &[])?;
    let mut positional = options.positional.iter().copied();
    let kind = match positional.next().map(str::to_ascii_lowercase).as_deref() {
        Some("income") => TransactionType::Income,
        Some("expense") => TransactionType::Expense,
        _ => {
            return Err(CommandError::InvalidArguments(
                "expected `add income ...` or `add expense ...`".into(),
            ))
        }
    };
    let active = context.active_context();
    let form = &mut context.form;
    form.set_context(active);
    form.kind = kind;
    form.amount = positional.next().unwrap_or_default().to_string();

    match kind {
        TransactionType::Expense => {
            let raw = positional.next().unwrap_or_default();
            form.category = if raw.trim().is_empty() {
                String::new()
            } else {
                active
                    .resolve_category(raw)
                    .ok_or_else(|| {
                        CommandError::InvalidArguments(format!(
                            "unknown {} category `{}`; run `categories` to see the options",
                            active, raw
                        ))
                    })?
                    .to_string()
            };
        }
        TransactionType::Income => {
            if let Some(method) = options.value("--method") {
                form.payment_method = method.parse::<PaymentMethod>().map_err(|_| {
                    CommandError::InvalidArguments(format!(
                        "unknown payment method `{}` (cash, bank or other)",
                        method
                    ))
                })?;
            }
        }
    }
    if let Some(extra) = positional.next() {
        return Err(CommandError::InvalidArguments(format!(
            "unexpected argument `{}`",
            extra
        )));
    }
    if let Some(date) = options.value("--date") {
        form.date = date.to_string();
    }
    form.description = options.value("--note").unwrap_or_default().to_string();

    submit_form(context)
}

fn run_add_wizard(context: &mut ShellContext) -> CommandResult {
    let active = context.active_context();
    let theme = &context.theme;
    let form = &mut context.form;
    form.set_context(active);

    let kinds = ["Expense", "Income"];
    let current = usize::from(form.kind == TransactionType::Income);
    form.kind = match io::select_index(theme, "Type", &kinds, current)? {
        0 => TransactionType::Expense,
        _ => TransactionType::Income,
    };
    form.amount = io::prompt_text(theme, "Amount", &form.amount)?;
    form.date = io::prompt_text(theme, "Date (YYYY-MM-DD)", &form.date)?;

    match form.kind {
        TransactionType::Expense => {
            let categories = active.expense_categories();
            let current = categories
                .iter()
                .position(|name| *name == form.category)
                .unwrap_or(0);
            let index = io::select_index(theme, "Category", categories, current)?;
            form.category = categories[index].to_string();
        }
        TransactionType::Income => {
            let labels: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.label()).collect();
            let current = PaymentMethod::ALL
                .iter()
                .position(|method| *method == form.payment_method)
                .unwrap_or(0);
            let index = io::select_index(theme, "Received via", &labels, current)?;
            form.payment_method = PaymentMethod::ALL[index];
        }
    }
    form.description = io::prompt_text(theme, "Description (optional)", &form.description)?;

    submit_form(context)
}

fn submit_form(context: &mut ShellContext) -> CommandResult {
    let candidate = match context.form.submit() {
        Ok(candidate) => candidate,
        Err(rejection) => {
            tracing::debug!(%rejection, "form submission rejected");
            io::print_warning(format!("Transaction not saved: {}.", rejection));
            return Ok(());
        }
    };
    let saved = context.store.add(candidate)?;
    io::print_success(format!(
        "Added {} [{}]",
        describe(saved, &context.config.currency),
        saved.short_id()
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let active = context.active_context();
    let listing = context.listing();
    if listing.is_empty() {
        io::print_info(format!(
            "No {} transactions yet. Use `add` to record one.",
            active
        ));
        return Ok(());
    }

    let currency = &context.config.currency;
    let mut table = Table::new(vec![
        ("ID", Alignment::Left),
        ("Date", Alignment::Left),
        ("Category", Alignment::Left),
        ("Payment", Alignment::Left),
        ("Description", Alignment::Left),
        ("Amount", Alignment::Right),
    ]);
    for txn in &listing {
        table.push(vec![
            txn.short_id(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.category().to_string(),
            txn.payment_method()
                .map(|method| method.label().to_string())
                .unwrap_or_else(|| "-".into()),
            txn.description.clone().unwrap_or_else(|| "-".into()),
            output::amount(
                &currency.format_signed(txn.amount, txn.is_income()),
                txn.is_income(),
            ),
        ]);
    }

    output_section(format!("{} transactions", active));
    io::print_info(table.render());
    io::print_info(format!("{} transaction(s)", listing.len()));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let active = context.active_context();
    output_section(format!("{} expense categories", active));
    for (index, name) in active.expense_categories().iter().enumerate() {
        io::print_info(format!("  {:>2}. {}", index + 1, name));
    }
    io::print_hint("Income entries are always filed under `Income`.");
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let options = parse_options(args, &[], &["--yes"])?;
    let [reference] = options.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: delete <id-or-prefix> [--yes]".into(),
        ));
    };
    let id = TransactionService::resolve_id(context.store.transactions(), reference)?;
    let summary = context
        .store
        .get(id)
        .map(|txn| describe(txn, &context.config.currency))
        .unwrap_or_default();

    if !context.confirm_destructive(&format!("Delete {}?", summary), options.has("--yes"))? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }
    match context.store.remove(id)? {
        Some(removed) => io::print_success(format!(
            "Deleted {}",
            describe(&removed, &context.config.currency)
        )),
        None => io::print_warning("Transaction was already removed."),
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let options = parse_options(args, &[], &["--yes"])?;
    if let Some(extra) = options.positional.first() {
        return Err(CommandError::InvalidArguments(format!(
            "unexpected argument `{}`",
            extra
        )));
    }
    let count = context.store.len();
    let prompt = "Delete ALL transactions for both Home and School? This cannot be undone.";
    if !context.confirm_destructive(prompt, options.has("--yes"))? {
        io::print_info("Nothing was deleted.");
        return Ok(());
    }
    context.store.clear()?;
    io::print_success(format!("Cleared {} transaction(s).", count));
    Ok(())
}

fn describe(txn: &Transaction, currency: &CurrencyFormat) -> String {
    format!(
        "{} {} ({}) on {}",
        txn.transaction_type(),
        currency.format(txn.amount),
        txn.category(),
        txn.date.format("%Y-%m-%d")
    )
}
