use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

pub fn generate_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "starrank", &mut io::stdout());

    eprintln!();
    eprintln!("Save the output to the appropriate location for your shell:");
    match shell {
        Shell::Bash => {
            let dir = "~/.local/share/bash-completion/completions";
            eprintln!("  starrank --completions bash > {}/starrank", dir);
        }
        Shell::Zsh => {
            eprintln!("  starrank --completions zsh > ~/.zsh/completions/_starrank");
            eprintln!("  # (Add 'fpath=(~/.zsh/completions $fpath)' before 'compinit' in .zshrc)");
        }
        Shell::Fish => {
            eprintln!("  starrank --completions fish > ~/.config/fish/completions/starrank.fish");
        }
        _ => {}
    }
}
