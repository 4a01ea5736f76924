//! Shared helpers for building access-log lines.

#![allow(dead_code)]

pub const OWNER: &str = "79a59df900b949e55d96a1e698fbacedfd6e09d98eacf8f8d5218e7cd47ef2be";

/// One access-log line in S3 server access-log format
pub fn log_line(operation: &str, key: &str, time: &str, bytes: &str, total_time: &str) -> String {
    format!(
        "{owner} bn-test [{time}] 192.0.2.3 {owner} 3E57427F3EXAMPLE {operation} {key} \
         \"GET /bn-test/{key} HTTP/1.1\" 200 - {bytes} 4096 {total_time} 12 \"-\" \
         \"Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_0)\" - \
         s9lzHYrFp76ZVxRcpX9+5cjAnEH2ROuNkd2BHfIa6UkFVdtjf5mKR3/eTPFvsiP/XV/VLi31234= \
         SigV4 ECDHE-RSA-AES128-GCM-SHA256 AuthHeader bn-test.s3.amazonaws.com TLSv1.2",
        owner = OWNER,
    )
}

/// A `REST.GET.OBJECT` line on 31 Oct 2018
pub fn get_line(key: &str, bytes: &str) -> String {
    log_line("REST.GET.OBJECT", key, "31/Oct/2018:10:00:00 +0000", bytes, "25")
}

/// Minimal path-style S3 endpoint on a loopback port
///
/// Answers ListObjectsV2 for `bucket` in two pages and serves each listed
/// key from `objects`. Every request target is recorded in arrival order.
pub struct MockS3 {
    pub endpoint: String,
    pub requests: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

impl MockS3 {
    pub fn start(bucket: &str, objects: Vec<(String, String)>) -> Self {
        use std::io::{BufRead, BufReader, Write};
        use std::net::TcpListener;
        use std::sync::{Arc, Mutex};

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let bucket = bucket.to_string();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let mut stream = stream.unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                loop {
                    let mut header = String::new();
                    if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                        break;
                    }
                }

                let target = request_line.split(' ').nth(1).unwrap_or("").to_string();
                seen.lock().unwrap().push(target.clone());

                let (status, body) = route(&bucket, &objects, &target);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
        });

        Self { endpoint, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn route(bucket: &str, objects: &[(String, String)], target: &str) -> (&'static str, String) {
    let list_path = format!("/{}?", bucket);
    if let Some(query) = target.strip_prefix(&list_path) {
        // First half of the keys on page one, the rest after the token
        let half = (objects.len() + 1) / 2;
        let (page, token) = if query.contains("continuation-token=page-2") {
            (&objects[half..], None)
        } else {
            (&objects[..half], Some("page-2"))
        };

        let contents: String = page
            .iter()
            .map(|(key, body)| {
                format!("<Contents><Key>{}</Key><Size>{}</Size></Contents>", key, body.len())
            })
            .collect();
        let token = token
            .map(|t| format!("<NextContinuationToken>{}</NextContinuationToken>", t))
            .unwrap_or_default();

        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <ListBucketResult><Name>{}</Name><IsTruncated>{}</IsTruncated>{}{}</ListBucketResult>",
            bucket,
            !token.is_empty(),
            token,
            contents
        );
        return ("200 OK", xml);
    }

    let object_prefix = format!("/{}/", bucket);
    match target
        .strip_prefix(&object_prefix)
        .and_then(|key| objects.iter().find(|(k, _)| k == key))
    {
        Some((_, body)) => ("200 OK", body.clone()),
        None => ("404 Not Found", String::new()),
    }
}
