use sproc::{Connection, In, Out, call, types};

pub fn blobs<E: Connection>(connection: &mut E) {
    // A zero-length blob input binds as NULL, the routine sees it missing.
    let combined = Out::of(types::blob());
    call("blobs_concat")
        .input("part1", b"ab".to_vec())
        .input("part2", Vec::new())
        .input("part3", b"cd".to_vec())
        .output("combined", &combined)
        .run(connection)
        .expect("Failed to run blobs_concat");
    assert_eq!(
        combined.get().expect("combined has a value"),
        Some(b"abcd".to_vec())
    );

    // All parts absent: the routine produces a zero-length large object,
    // which reads back as NULL.
    let combined = Out::of(types::blob());
    call("blobs_concat")
        .input("part1", None::<Vec<u8>>)
        .input("part2", Vec::new())
        .input("part3", None::<Vec<u8>>)
        .output("combined", &combined)
        .run(connection)
        .expect("Failed to run blobs_concat");
    assert_eq!(combined.get().expect("combined has a value"), None);

    // Unlike blob, binary keeps zero-length bytes as-is.
    let echoed = Out::of(types::binary());
    call("echo")
        .input(
            "value",
            In::new(Some(Vec::new()), types::binary()).expect("binary has a bind side"),
        )
        .output("echoed", &echoed)
        .run(connection)
        .expect("Failed to echo empty bytes");
    assert_eq!(echoed.get().expect("echoed has a value"), Some(Vec::new()));

    // And a binary round trip does not go through a large object at all.
    let echoed = Out::of(types::binary());
    call("echo")
        .input(
            "value",
            In::new(Some(vec![0, 1, 2, 255]), types::binary()).expect("binary has a bind side"),
        )
        .output("echoed", &echoed)
        .run(connection)
        .expect("Failed to echo bytes");
    assert_eq!(
        echoed.get().expect("echoed has a value"),
        Some(vec![0, 1, 2, 255])
    );
}
