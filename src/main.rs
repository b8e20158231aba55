fn main() {
    if let Err(e) = mistral_chat::cli::main() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
