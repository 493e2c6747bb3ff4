use criterion::{criterion_group, criterion_main, Criterion};

use enronscan::parser::{header, normalize};

const SAMPLE: &str = "\
Message-ID: <10001.1075855378110.JavaMail.evans@thyme>
Date: Mon, 14 May 2001 16:39:00 -0700 (PDT)
From: phillip.allen@enron.com
To: tim.belden@enron.com, john.lavorato@enron.com,
\tlouise.kitchen@enron.com
Subject: Re: Budget
Mime-Version: 1.0

Looks good, approved.

 -----Original Message-----
From: Tim Belden
Sent: Monday, May 14, 2001 8:30 AM
To: Phillip Allen
Subject: Budget
";

fn bench_capture_headers(c: &mut Criterion) {
    c.bench_function("capture_headers_sample", |b| {
        b.iter(|| header::capture_headers(SAMPLE.lines()))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let headers = header::capture_headers(SAMPLE.lines());
    c.bench_function("normalize_sample", |b| {
        b.iter(|| normalize::normalize(&headers).unwrap())
    });
}

criterion_group!(benches, bench_capture_headers, bench_normalize);
criterion_main!(benches);
