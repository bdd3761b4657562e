fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fall back to the vendored protoc when the host does not provide one
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR")?);

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(out_dir.join("listings_descriptor.bin"))
        .compile_protos(&["proto/listings.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/listings.proto");
    Ok(())
}
