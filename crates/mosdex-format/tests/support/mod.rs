#![allow(dead_code)]

use mosdex_core::{InMemoryModel, ModelSpec};
use mosdex_format::{Document, WriterConfig, parse_document};
use serde_json::{Value, json};

pub fn model(value: Value) -> InMemoryModel {
    let spec: ModelSpec = serde_json::from_value(value).expect("valid model spec");
    InMemoryModel::from_spec(spec).expect("valid model")
}

pub fn forward(value: Value) -> Document {
    let model = model(value);
    let text = mosdex_format::convert(&model, &WriterConfig::new()).expect("convert");
    parse_document(&text).expect("written document parses")
}

/// `e(i).. x(i) =G= 1` over two labels.
pub fn diagonal() -> Value {
    json!({
        "name": "diagonal",
        "objective": {"name": "z", "nonzeros": [{"col": 0, "value": 1.0}, {"col": 1, "value": 1.0}]},
        "domains": ["i"],
        "symbols": [
            {"name": "x", "type": "variable", "domains": ["i"]},
            {"name": "e", "type": "equation", "domains": ["i"]}
        ],
        "rows": [
            {"symbol": "e", "labels": ["a"], "sense": "G", "rhs": 1.0,
             "nonzeros": [{"col": 0, "value": 2.0}]},
            {"symbol": "e", "labels": ["b"], "sense": "G", "rhs": 1.0,
             "nonzeros": [{"col": 1, "value": 3.0}]}
        ],
        "cols": [
            {"symbol": "x", "labels": ["a"], "lower": 0.0},
            {"symbol": "x", "labels": ["b"], "lower": 0.0}
        ]
    })
}

/// `e(i).. sum(j, x(i,j)) =L= 4`.
pub fn row_sum() -> Value {
    let mut cols = Vec::new();
    for i in ["a", "b"] {
        for j in ["p", "q"] {
            cols.push(json!({"symbol": "x", "labels": [i, j], "lower": 0.0}));
        }
    }
    json!({
        "name": "rowsum",
        "objective": {"name": "z", "sense": "maximize", "nonzeros": [{"col": 3, "value": 1.0}]},
        "domains": ["i", "j"],
        "symbols": [
            {"name": "x", "type": "variable", "domains": ["i", "j"]},
            {"name": "e", "type": "equation", "domains": ["i"]}
        ],
        "rows": [
            {"symbol": "e", "labels": ["a"], "sense": "L", "rhs": 4.0,
             "nonzeros": [{"col": 0, "value": 1.0}, {"col": 1, "value": 1.0}]},
            {"symbol": "e", "labels": ["b"], "sense": "L", "rhs": 4.0,
             "nonzeros": [{"col": 2, "value": 1.0}, {"col": 3, "value": 1.0}]}
        ],
        "cols": cols
    })
}

/// Binary `y(i)` with one tightened lower bound and a scalar integer `n`.
pub fn binaries() -> Value {
    json!({
        "name": "binaries",
        "class": "mip",
        "objective": {"name": "z", "nonzeros": [{"col": 0, "value": 1.0}, {"col": 2, "value": 1.0}]},
        "domains": ["i"],
        "symbols": [
            {"name": "y", "type": "variable", "domains": ["i"]},
            {"name": "n", "type": "variable"},
            {"name": "cover", "type": "equation"}
        ],
        "rows": [
            {"symbol": "cover", "sense": "G", "rhs": 1.0,
             "nonzeros": [{"col": 0, "value": 1.0}, {"col": 1, "value": 1.0}, {"col": 2, "value": -1.0}]}
        ],
        "cols": [
            {"symbol": "y", "labels": ["a"], "type": "B"},
            {"symbol": "y", "labels": ["b"], "type": "B", "lower": 0.3},
            {"symbol": "n", "type": "I", "lower": 0.0, "upper": 10.0}
        ]
    })
}

/// A row with a relational tag the interchange format cannot express.
pub fn unsupported_sense() -> Value {
    let mut value = diagonal();
    value["rows"][0]["sense"] = json!("N");
    value["rows"][1]["sense"] = json!("N");
    value
}
