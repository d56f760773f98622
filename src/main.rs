fn main() {
    #[cfg(feature = "cli")]
    templatemaker::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("templatemaker: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
