use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("fictex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert FanFiction.net chapter pages into LaTeX")
        .arg(clap::arg!(<INPUT> ... "URLs to fetch, local HTML files, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <DIR> "Output directory for the generated .tex files")
                .value_name("DIR")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(-c --cleanup "Enable cleanup of spacing and punctuation in the output text"))
        .arg(clap::arg!(--"dump-metadata" "Print chapter metadata as JSON instead of writing files"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Enable progress output"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "fictex", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "fictex", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "fictex", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "fictex", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
