fn main() {
    if let Err(e) = lus_drv::main() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
