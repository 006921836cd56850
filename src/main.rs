use clap::Parser;

fn main() {
    let cli = import_precheck::cli::Cli::parse();
    // Initialize structured logging (tracing) with VERBOSE 0..3 mapping.
    import_precheck::logging::init_logging();

    if let Err(e) = import_precheck::cli::handle_cli(cli) {
        let code = e.exit_code();
        tracing::error!(error = %e, exit_code = code, "fatal_error");
        std::process::exit(code);
    }
}
