use crate::{
    advice::{AdviceRequester, GeminiProvider},
    cli::{
        core::{CommandResult, ShellContext},
        io,
        output::section as output_section,
        registry::CommandEntry,
    },
};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "advice",
        "Ask the AI advisor about the active context",
        "advice",
        cmd_advice,
    )]
}

fn cmd_advice(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let active = context.active_context();
    let listing = context.listing();
    if listing.is_empty() {
        io::print_warning(format!(
            "Add some {} transactions before asking for advice.",
            active
        ));
        return Ok(());
    }

    let provider = GeminiProvider::from_config(&context.config);
    if provider.has_credential() {
        io::print_info("Analyzing your spending...");
    }
    let reply = AdviceRequester::new(provider).request(&listing, active);

    output_section(format!("Smart insights: {}", active));
    io::print_info(reply);
    Ok(())
}
