fn main() {
    println!("cargo:rerun-if-changed=proto/scg.proto");

    protobuf_codegen::Codegen::new()
        .pure()
        .cargo_out_dir("protos")
        .include("proto")
        .input("proto/scg.proto")
        .run_from_script();
}
