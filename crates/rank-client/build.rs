fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile the proto file for the trap-ranking client
    tonic_build::compile_protos("../../proto/trap_ranking.proto")?;
    Ok(())
}
