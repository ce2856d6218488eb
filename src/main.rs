//! # Pagegrid CLI
//!
//! Usage:
//!   pagegrid request.json -o layout.json
//!   echo '{ ... }' | pagegrid -o layout.json
//!   pagegrid --example > request.json

use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_request_json());
        return;
    }

    // Read input
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).expect("Failed to read input file")
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).expect("Failed to read stdin");
        buf
    };

    // Parse output path
    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "layout.json".to_string());

    // Lay out
    match pagegrid::layout_json(&input) {
        Ok(placed) => {
            fs::write(&output_path, &placed).expect("Failed to write layout");
            eprintln!("✓ Written {} bytes to {}", placed.len(), output_path);
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

fn example_request_json() -> &'static str {
    r##"{
  "dashboard": {
    "title": "Service Overview",
    "panels": [
      {
        "id": 1,
        "title": "Requests per Second",
        "gridRect": { "x": 0, "y": 0, "w": 12, "h": 8 }
      },
      {
        "id": 2,
        "title": "Error Rate",
        "gridRect": { "x": 12, "y": 0, "w": 12, "h": 8 }
      },
      {
        "id": 3,
        "title": "Latency Percentiles",
        "gridRect": { "x": 0, "y": 8, "w": 24, "h": 10 }
      },
      {
        "id": 10,
        "title": "Infrastructure",
        "kind": "row",
        "gridRect": { "x": 0, "y": 18, "w": 24, "h": 1 },
        "collapsed": false
      },
      {
        "id": 11,
        "title": "CPU Usage",
        "gridRect": { "x": 0, "y": 19, "w": 8, "h": 9 }
      },
      {
        "id": 12,
        "title": "Memory Usage",
        "gridRect": { "x": 8, "y": 19, "w": 8, "h": 9 }
      },
      {
        "id": 13,
        "title": "Disk I/O",
        "gridRect": { "x": 16, "y": 19, "w": 8, "h": 9 }
      }
    ]
  },
  "print": {
    "orientation": "Landscape",
    "scaleFactor": 1.0,
    "pageBreaks": true
  }
}"##
}
