fn main() {
    use clap::Parser;
    use std::error::Error;
    let args = slotdoc::cli::Args::parse();
    slotdoc::cli::init_logging(&args);
    if let Err(e) = slotdoc::cli::run(&args) {
        eprintln!(" ERROR  {}", e);
        if args.verbose {
            let mut source = e.source();
            while let Some(s) = source {
                eprintln!("  cause: {}", s);
                source = s.source();
            }
        }
        std::process::exit(e.exit_code());
    }
}
