use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("decant")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract the main content of web pages")
        .arg(clap::arg!([INPUT] "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (markdown, html, text)")
                .default_value("markdown")
                .value_parser(["markdown", "html", "text"]),
        )
        .arg(
            clap::Arg::new("type")
                .short('t')
                .long("type")
                .value_name("TYPE")
                .help("Page type override (article, forum, weixin)")
                .value_parser(["article", "forum", "weixin"]),
        )
        .arg(clap::arg!(--base_url <URL> "Source URL of a file or stdin input"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests"))
        .arg(
            clap::arg!(--rules <FILE> "Site rules file (JSON)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "decant", &completions_dir).unwrap();
    }

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
