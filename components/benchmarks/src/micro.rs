//! Micro-benchmarks for class definition and instantiation
//!
//! Each benchmark isolates one kind of member the compiled constructor has
//! to materialize, or one composition feature it has to honor.

use crate::runner::{Benchmark, BenchmarkResult, BenchmarkSuite, Setup};
use class_system::{ClassBody, ClassRegistry, Constructor};
use core_types::{ClassResult, Value};

const DEFAULT_ITERATIONS: usize = 10_000;

fn literal_members(registry: &mut ClassRegistry) -> ClassResult<Constructor> {
    registry.define(
        "Bench.Point",
        ClassBody::new()
            .member("x", Value::number(0.0))
            .member("y", Value::number(0.0))
            .member("label", Value::string("origin"))
            .member("visible", Value::boolean(true))
            .member("parent", Value::Null),
    )
}

fn inline_arrays(registry: &mut ClassRegistry) -> ClassResult<Constructor> {
    registry.define(
        "Bench.Palette",
        ClassBody::new()
            .member("empty", Value::array())
            .member(
                "colors",
                Value::array_from(vec![
                    Value::string("red"),
                    Value::string("green"),
                    Value::string("blue"),
                ]),
            )
            .member(
                "weights",
                Value::array_from((1..=8).map(|n| Value::number(n as f64)).collect()),
            ),
    )
}

fn nested_objects(registry: &mut ClassRegistry) -> ClassResult<Constructor> {
    let layout = Value::object_from([
        ("width", Value::number(100.0)),
        ("height", Value::number(50.0)),
        (
            "margin",
            Value::object_from([("top", Value::number(1.0)), ("left", Value::number(2.0))]),
        ),
    ]);
    registry.define(
        "Bench.Widget",
        ClassBody::new()
            .member("layout", layout)
            .member("handlers", Value::object()),
    )
}

fn reference_members(registry: &mut ClassRegistry) -> ClassResult<Constructor> {
    let rows = Value::array_from(vec![
        Value::object_from([("id", Value::number(1.0))]),
        Value::object_from([("id", Value::number(2.0))]),
    ]);
    registry.define(
        "Bench.Table",
        ClassBody::new()
            .member("rows", rows)
            .member("matcher", Value::pattern(r"^row-\d+$")?)
            .method("count", |this, _| {
                Ok(Value::number(
                    this.get("rows").map_or(0, |rows| rows.array_length()) as f64,
                ))
            }),
    )
}

fn deep_inheritance(registry: &mut ClassRegistry) -> ClassResult<Constructor> {
    registry.define(
        "Bench.Level0",
        ClassBody::new()
            .member("depth", Value::number(0.0))
            .method("init", |this, _| {
                this.set("depth", Value::number(1.0));
                Ok(Value::Undefined)
            }),
    )?;
    registry.define(
        "Bench.Level1",
        ClassBody::new()
            .extends("Bench.Level0")
            .member("first", Value::Null)
            .method("init", |this, args| {
                this.call_super("Level0", "init", args)?;
                this.set("first", args.first().cloned().unwrap_or(Value::Null));
                Ok(Value::Undefined)
            }),
    )?;
    registry.define(
        "Bench.Level2",
        ClassBody::new()
            .extends("Bench.Level1")
            .member("tags", Value::array())
            .method("init", |this, args| {
                this.call_super("Level1", "init", args)?;
                if let Some(tags) = this.get("tags") {
                    tags.push(Value::string("level2"));
                }
                Ok(Value::Undefined)
            }),
    )?;
    registry.define(
        "Bench.Level3",
        ClassBody::new()
            .extends("Bench.Level2")
            .method("init", |this, args| this.call_super("Level2", "init", args)),
    )
}

fn mixin_composition(registry: &mut ClassRegistry) -> ClassResult<Constructor> {
    registry.define(
        "Bench.Observable",
        ClassBody::new()
            .member("listeners", Value::array())
            .method("on", |this, args| {
                if let (Some(listeners), Some(listener)) = (this.get("listeners"), args.first()) {
                    listeners.push(listener.clone());
                }
                Ok(Value::Undefined)
            }),
    )?;
    registry.define(
        "Bench.Serializable",
        ClassBody::new()
            .member("format", Value::string("json"))
            .method("serialize", |this, _| {
                Ok(Value::string(this.class_path().to_string()))
            }),
    )?;
    registry.define(
        "Bench.Model",
        ClassBody::new()
            .implements("Bench.Observable")
            .implements("Bench.Serializable")
            .member("attributes", Value::object()),
    )
}

fn shared_members(registry: &mut ClassRegistry) -> ClassResult<Constructor> {
    registry.define(
        "Bench.Cached",
        ClassBody::new()
            .shared("cache")
            .member("cache", Value::object())
            .member("hits", Value::number(0.0)),
    )?;
    registry.define(
        "Bench.CachedChild",
        ClassBody::new()
            .extends("Bench.Cached")
            .member("misses", Value::number(0.0)),
    )
}

fn benchmark(name: &str, description: &str, setup: Setup, args: Vec<Value>) -> Benchmark {
    Benchmark {
        name: name.to_string(),
        description: description.to_string(),
        setup,
        args,
        iterations: DEFAULT_ITERATIONS,
    }
}

/// Create all micro-benchmarks
pub fn create_benchmarks() -> Vec<Benchmark> {
    vec![
        benchmark(
            "literal_members",
            "Numbers, strings, booleans and null",
            literal_members,
            Vec::new(),
        ),
        benchmark(
            "inline_arrays",
            "Arrays of simple values",
            inline_arrays,
            Vec::new(),
        ),
        benchmark(
            "nested_objects",
            "Plain object members copied per instance",
            nested_objects,
            Vec::new(),
        ),
        benchmark(
            "reference_members",
            "Non-simple arrays, patterns and methods",
            reference_members,
            Vec::new(),
        ),
        benchmark(
            "deep_inheritance",
            "Four-level chain with init calling the overridden init",
            deep_inheritance,
            vec![Value::string("arg")],
        ),
        benchmark(
            "mixin_composition",
            "Class implementing two mixins",
            mixin_composition,
            Vec::new(),
        ),
        benchmark(
            "shared_members",
            "Subclass inheriting a shared member",
            shared_members,
            Vec::new(),
        ),
    ]
}

/// All micro-benchmarks as a suite
pub fn create_suite() -> BenchmarkSuite {
    let mut suite = BenchmarkSuite::new("micro".to_string());
    for benchmark in create_benchmarks() {
        suite.add(benchmark);
    }
    suite
}

/// Run all micro-benchmarks
pub fn run_all() -> Vec<BenchmarkResult> {
    create_suite().run()
}
