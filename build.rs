fn main() {
    // UniFFI scaffolding comes from the setup_scaffolding!() proc-macro in
    // uniffi_bindings.rs, so there is no UDL file to compile here.
    println!("cargo:rerun-if-changed=src/uniffi_bindings.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
