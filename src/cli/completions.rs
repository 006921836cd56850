use clap::CommandFactory;
use clap_complete::shells::{Bash, Fish, Zsh};
use std::io::Write;

use crate::cli::args::{Cli, Shell};

const BIN_NAME: &str = "import-precheck";

pub fn emit(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    match shell {
        Shell::Bash => clap_complete::generate(Bash, &mut cmd, BIN_NAME, out),
        Shell::Zsh => clap_complete::generate(Zsh, &mut cmd, BIN_NAME, out),
        Shell::Fish => clap_complete::generate(Fish, &mut cmd, BIN_NAME, out),
    }
}
