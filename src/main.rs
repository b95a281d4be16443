fn main() {
    if let Err(err) = irr::run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
