//! Batch unpacking regression test
//!
//! A failing item must not stop the batch, and progress reports must cover
//! every input in order.
//!
//! Run with:
//! ```
//! cargo test -p texpack-pack --test batch_reg
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use texpack_core::ChannelId;
use texpack_pack::{BatchEvent, BatchRunner, PackError, UnpackOptions};
use texpack_test::{RegParams, scratch_dir, write_corrupt_file, write_dxt1_dds, write_solid_png};

#[test]
fn batch_reg() {
    let mut rp = RegParams::new("batch");
    let dir = scratch_dir("batch").unwrap();
    let out = dir.join("out");

    let first = write_solid_png(&dir, "first.png", 8, 8, (10, 20, 30, 40)).unwrap();
    let broken = write_corrupt_file(&dir, "broken.png").unwrap();
    let third = write_solid_png(&dir, "third.png", 4, 2, (128, 0, 255, 128)).unwrap();
    let inputs = [first.clone(), broken.clone(), third.clone()];

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut runner = BatchRunner::new(UnpackOptions {
        gamma_correction: true,
    });
    runner.subscribe(move |e: &BatchEvent| {
        let tag = match e {
            BatchEvent::Started { index, .. } => format!("start {index}"),
            BatchEvent::ItemUnpacked { index, .. } => format!("ok {index}"),
            BatchEvent::ItemFailed { index, .. } => format!("fail {index}"),
            BatchEvent::Completed { report } => format!("done {}", report.total()),
        };
        sink.borrow_mut().push(tag);
    });

    let mut progress: Vec<(usize, usize, PathBuf)> = Vec::new();
    let mut on_progress = |i: usize, total: usize, path: &Path| {
        progress.push((i, total, path.to_path_buf()));
    };
    let report = runner.run(&inputs, &out, Some(&mut on_progress)).unwrap();

    // Test 1: every item attempted, failure isolated to the corrupt one
    rp.compare_values(3.0, report.total() as f64, 0.0);
    rp.compare_values(2.0, report.succeeded().count() as f64, 0.0);
    rp.compare_values(1.0, report.failed().count() as f64, 0.0);
    rp.check(!report.is_success(), "batch with a failure is not a success");
    let failed = report.failed().next().unwrap();
    rp.check(failed.path == broken, "failed item is the corrupt file");
    if let Err(msg) = &failed.outcome {
        eprintln!("  {msg}");
        rp.check(msg.contains("broken.png"), "error text names the file");
    }

    // Test 2: progress once per item, before it, with the full total
    let seen: Vec<(usize, usize)> = progress.iter().map(|(i, t, _)| (*i, *t)).collect();
    rp.check(seen == [(0, 3), (1, 3), (2, 3)], "progress indices and total");
    rp.check(progress[2].2 == third, "last progress path");

    // Test 3: observer events in lifecycle order
    rp.check(
        *events.borrow()
            == [
                "start 0", "ok 0", "start 1", "fail 1", "start 2", "ok 2", "done 3",
            ],
        "event order",
    );

    // Test 4: planes land in per-input subdirectories with gamma applied
    let files = report.items()[2].outcome.clone().unwrap();
    rp.compare_values(4.0, files.len() as f64, 0.0);
    rp.check(files[3] == out.join("third").join("third_A.png"), "alpha file name");
    let red = texpack_io::read_image(&files[0]).unwrap();
    rp.compare_values(188.0, red.get_rgba(0, 0).unwrap().0 as f64, 0.0);
    rp.compare_values(2.0, red.height() as f64, 0.0);
    for channel in ChannelId::ALL {
        let name = format!("first_{}.png", channel.letter());
        rp.check(out.join("first").join(&name).exists(), &name);
    }
    rp.check(!out.join("broken").join("broken_R.png").exists(), "no output for failed item");

    // Test 5: unsupported extensions fail per item
    let text = dir.join("notes.txt");
    std::fs::write(&text, b"not an image").unwrap();
    let report = runner.run(&[&text, &first], &out, None).unwrap();
    rp.check(
        matches!(report.items()[0].outcome, Err(_)) && report.items()[1].is_success(),
        "unsupported extension isolated",
    );

    // Test 6: DXT1 textures unpack like any other input
    runner.set_gamma_correction(false);
    let texture = write_dxt1_dds(&dir, "texture.dds", 8, 4, (31 << 11) | (32 << 5)).unwrap();
    let report = runner.run(&[&texture], &out, None).unwrap();
    rp.check(report.is_success(), "dds item unpacked");
    for (channel, value) in ChannelId::ALL.into_iter().zip([255.0, 129.0, 0.0, 255.0]) {
        let name = format!("texture_{}.png", channel.letter());
        let plane = texpack_io::read_image(out.join("texture").join(&name)).unwrap();
        rp.compare_values(value, plane.get_rgba(7, 3).unwrap().0 as f64, 0.0);
        rp.compare_values(8.0, plane.width() as f64, 0.0);
    }

    // Test 7: empty list is rejected up front
    let empty: [&Path; 0] = [];
    rp.check(
        matches!(runner.run(&empty, &out, None), Err(PackError::NoInputs)),
        "empty batch",
    );

    assert!(rp.cleanup(), "batch regression test failed");
}
