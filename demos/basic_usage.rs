//! Basic usage example for GameWire
//!
//! Run with: RUST_LOG=gamewire=trace cargo run --example basic_usage

use gamewire::*;
use tracing_subscriber::EnvFilter;

/// A spawn message as a server would send it
#[derive(Debug, Clone, PartialEq)]
struct Spawn {
    id: Option<NetId>,
    prefab: String,
    owner: Option<String>,
    position: Vector3,
    rotation: Quaternion,
    tint: Color32,
}

impl Wire for Spawn {
    fn write_to(&self, writer: &mut Writer) -> Result<()> {
        writer.write(&self.id)?;
        writer.write(&self.prefab)?;
        writer.write(&self.owner)?;
        writer.write(&self.position)?;
        writer.write(&self.rotation)?;
        writer.write(&self.tint)
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            id: reader.read()?,
            prefab: reader.read()?,
            owner: reader.read()?,
            position: reader.read()?,
            rotation: reader.read()?,
            tint: reader.read()?,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gamewire=debug")),
        )
        .init();

    println!("GameWire Basic Usage Example");
    println!("============================");

    // Example 1: Primitives
    println!("\n1. Primitives:");
    {
        let mut writer = Writer::new();
        writer.write_u32(0x0102_0304);
        writer.write_f32(9.81);
        writer.write_bool(true);
        writer.write_char('Ω')?;
        println!("  Encoded {} bytes: {}", writer.len(), writer);

        let mut reader = Reader::new(writer.as_slice());
        println!(
            "  Decoded: u32={:#010x}, f32={}, bool={}, char={}",
            reader.read_u32()?,
            reader.read_f32()?,
            reader.read_bool()?,
            reader.read_char()?
        );
    }

    // Example 2: Strings, null vs empty
    println!("\n2. Strings:");
    {
        let mut writer = Writer::new();
        writer.write_string(None)?;
        writer.write_str("")?;
        writer.write_str("hello")?;
        println!("  Encoded: {}", writer);

        let mut reader = Reader::new(writer.as_slice());
        for _ in 0..3 {
            println!("  Decoded: {:?}", reader.read_str()?);
        }
    }

    // Example 3: A composite message through a pooled writer
    println!("\n3. Spawn Message:");
    let spawn = Spawn {
        id: NetId::new(17),
        prefab: "Player".to_owned(),
        owner: Some("alice".to_owned()),
        position: Vector3::new(4.0, 0.0, -2.5),
        rotation: Quaternion::IDENTITY,
        tint: Color32::new(255, 128, 0, 255),
    };
    let bytes = {
        let mut writer = pool::global().acquire();
        writer.write(&spawn)?;
        println!("  Encoded {} bytes", writer.len());
        writer.to_bytes()
    };
    let decoded: Spawn = Reader::new(&bytes).read()?;
    println!("  Decoded: {:?}", decoded);
    assert_eq!(decoded, spawn);

    // Example 4: Lists through the runtime registry
    println!("\n4. Registry Dispatch:");
    {
        registry::register_wire::<Spawn>();
        let wave = vec![spawn.clone(), Spawn { id: NetId::new(18), ..spawn }];

        let mut writer = Writer::new();
        registry::write_list(&mut writer, Some(wave.as_slice()))?;
        registry::write_list::<Spawn>(&mut writer, None)?;

        let mut reader = Reader::new(writer.as_slice());
        let decoded = registry::read_list::<Spawn>(&mut reader)?;
        let missing = registry::read_list::<Spawn>(&mut reader)?;
        println!(
            "  Decoded {} spawns, then {:?}",
            decoded.map_or(0, |w| w.len()),
            missing
        );
    }

    // Example 5: Error handling
    println!("\n5. Error Handling:");
    {
        let truncated = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&truncated);
        match reader.read_u32() {
            Ok(_) => println!("  Unexpected success"),
            Err(e) => println!("  Expected error: {}", e),
        }

        let limits = Limits::new().with_max_string_length(8);
        let mut writer = Writer::with_limits(limits);
        match writer.write_str("far too long for the cap") {
            Ok(()) => println!("  Unexpected success"),
            Err(e) => println!("  Expected error: {} (writer still {} bytes)", e, writer.len()),
        }
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
