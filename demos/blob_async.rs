//! Assembling blobs and awaiting their contents.
//!
//! Run with:
//!     cargo run --example blob_async

use wirebuf::{Blob, BlobOptions, BlobPart, Buffer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let header = Buffer::from_slice(b"v1:");

    let blob = Blob::with_options(
        &[
            BlobPart::Buffer(&header),
            BlobPart::Text("status="),
            BlobPart::Uint16(&[200]),
        ],
        BlobOptions {
            kind: "text/plain".to_string(),
            endings: "transparent".parse()?,
        },
    );

    println!("blob: {} bytes, type {:?}", blob.size(), blob.kind());
    println!("text: {}", blob.text().await);

    // Slices are zero-copy views with their own content type
    let tail = blob.slice(Some(3), None, None);
    println!("tail: {}", tail.text().await);

    let bytes = blob.array_buffer().await;
    println!("first byte: {:#04x}", bytes[0]);

    Ok(())
}
