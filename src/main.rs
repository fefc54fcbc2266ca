fn main() {
    if let Err(err) = gitcanvas::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
