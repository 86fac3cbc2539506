const PROTOS: &[&str] = &[
    "../../proto/sotagrpc/v1/robotlib.proto",
    "../../proto/sotagrpc/v1/sotatalk.proto",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    tonic_build::configure()
        .build_client(true)
        .build_server(std::env::var_os("CARGO_FEATURE_SERVER").is_some())
        .compile_protos(PROTOS, &["../../proto"])?;

    for proto in PROTOS {
        println!("cargo:rerun-if-changed={}", proto);
    }
    Ok(())
}
