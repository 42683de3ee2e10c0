fn main() {
    if let Err(e) = wispc_drv::main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
