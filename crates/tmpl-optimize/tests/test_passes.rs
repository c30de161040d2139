mod support;

use pretty_assertions::assert_eq;
use support::{printed, render_body, render_program, run_pass, run_pass_with};
use tmpl_core::ast::{AstBuilder, AssignmentOperator, BinaryOperator, VarKind};
use tmpl_core::Result;
use tmpl_optimize::passes::*;
use tmpl_optimize::OptimizeOptions;

#[test]
fn test_flatten_splices_nested_blocks_in_order() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![
            b.block(vec![
                b.block(vec![b.expr_stmt(b.ident("a"))]),
                b.expr_stmt(b.ident("b")),
            ]),
            b.ret(Some(b.ident("html"))),
        ],
    );

    let spliced = run_pass(&FlattenBlocksPass, &mut program)?;
    assert_eq!(spliced, 2);
    assert_eq!(
        program.to_string(),
        "function render(locals) { a; b; return html; }"
    );
    assert!(!has_nested_blocks(&program));
    Ok(())
}

#[test]
fn test_flatten_is_idempotent() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![
            b.if_stmt(
                b.ident("c"),
                b.block(vec![b.block(vec![b.block(vec![b.expr_stmt(b.ident("x"))])])]),
                None,
            ),
            b.block(vec![]),
        ],
    );
    run_pass(&FlattenBlocksPass, &mut program)?;
    let once = program.clone();

    assert_eq!(run_pass(&FlattenBlocksPass, &mut program)?, 0);
    assert_eq!(program, once);
    // a branch body is not inside a block, so it survives
    assert_eq!(
        program.to_string(),
        "function render(locals) { if (c) { x; } }"
    );
    Ok(())
}

#[test]
fn test_hoist_partial_nested_three_blocks_deep() -> Result<()> {
    let b = AstBuilder::new();
    let partial = b.func_decl(
        "partial$row",
        &["row"],
        vec![b.append_stmt("html", b.member(b.ident("row"), "name"))],
    );
    let untouched = partial.clone();
    let mut program = render_program(
        &b,
        vec![
            b.var("html", Some(b.string(""))),
            b.block(vec![b.block(vec![b.block(vec![partial])])]),
            b.ret(Some(b.ident("html"))),
        ],
    );

    assert_eq!(run_pass(&HoistPartialsPass, &mut program)?, 1);
    let top = program.statements().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0], untouched);
    assert_eq!(
        top[1].to_string(),
        "function render(locals) { var html = \"\"; { { {} } } return html; }"
    );
    Ok(())
}

#[test]
fn test_hoist_lifts_every_partial_in_document_order() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = b.program(vec![
        b.func_decl("partial$top", &[], vec![]),
        b.func_decl(
            "render",
            &["locals"],
            vec![
                b.func_decl("partial$a", &[], vec![]),
                b.func_decl("helper", &[], vec![]),
                b.block(vec![b.func_decl(
                    "partial$b",
                    &[],
                    vec![b.func_decl("partial$inner", &[], vec![])],
                )]),
            ],
        ),
    ]);

    // `partial$top` already sits in its final slot
    assert_eq!(run_pass(&HoistPartialsPass, &mut program)?, 3);
    let names: Vec<_> = program
        .statements()
        .unwrap()
        .iter()
        .map(|stmt| stmt.function_name().unwrap_or_default())
        .collect();
    assert_eq!(
        names,
        vec!["partial$top", "partial$a", "partial$b", "partial$inner", "render"]
    );
    assert_eq!(
        program.statements().unwrap()[2].to_string(),
        "function partial$b() {}"
    );
    Ok(())
}

#[test]
fn test_hoist_lifts_partial_nested_in_top_level_partial() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = b.program(vec![b.func_decl(
        "outer$p",
        &[],
        vec![b.func_decl("inner$p", &[], vec![])],
    )]);

    assert_eq!(run_pass(&HoistPartialsPass, &mut program)?, 1);
    assert_eq!(
        program.to_string(),
        "function outer$p() {}\nfunction inner$p() {}"
    );
    Ok(())
}

#[test]
fn test_hoist_moves_top_level_partials_ahead_of_other_statements() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = b.program(vec![b.var("q", None), b.func_decl("a$p", &[], vec![])]);

    assert_eq!(run_pass(&HoistPartialsPass, &mut program)?, 1);
    assert_eq!(program.to_string(), "function a$p() {}\nvar q;");

    let hoisted = program.clone();
    assert_eq!(run_pass(&HoistPartialsPass, &mut program)?, 0);
    assert_eq!(program, hoisted);
    Ok(())
}

#[test]
fn test_hoist_respects_the_configured_marker() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(&b, vec![b.func_decl("partial$row", &[], vec![])]);
    let options = OptimizeOptions {
        partial_marker: '@',
        ..OptimizeOptions::default()
    };
    assert_eq!(run_pass_with(&HoistPartialsPass, &mut program, &options)?, 0);
    assert_eq!(program.statements().unwrap().len(), 1);
    Ok(())
}

#[test]
fn test_remove_unused_assignments() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![
            b.var("html", Some(b.string(""))),
            b.assign_stmt("cache", b.member(b.ident("locals"), "a")),
            b.assign_stmt("seen", b.number(1.0)),
            b.append_stmt("html", b.ident("seen")),
            b.append_stmt("total", b.number(1.0)),
            b.expr_stmt(b.assign(
                AssignmentOperator::Assign,
                b.member(b.ident("locals"), "flag"),
                b.number(1.0),
            )),
            b.ret(Some(b.ident("html"))),
        ],
    );

    assert_eq!(run_pass(&RemoveUnusedAssignmentsPass, &mut program)?, 1);
    assert_eq!(
        printed(render_body(&program)),
        vec![
            "var html = \"\";",
            "seen = 1;",
            "html += seen;",
            "total += 1;",
            "locals.flag = 1;",
            "return html;",
        ]
    );
    Ok(())
}

#[test]
fn test_remove_unused_assignment_sees_reads_in_nested_closures() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![
            b.assign_stmt("item", b.member(b.ident("locals"), "item")),
            b.var(
                "cb",
                Some(b.func_expr(&[], vec![b.ret(Some(b.ident("item")))])),
            ),
            b.expr_stmt(b.call(b.ident("cb"), vec![])),
        ],
    );
    assert_eq!(run_pass(&RemoveUnusedAssignmentsPass, &mut program)?, 0);
    Ok(())
}

#[test]
fn test_remove_unused_assignment_in_branch_leaves_empty_statement() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![b.if_stmt(
            b.ident("c"),
            b.assign_stmt("stray", b.number(1.0)),
            None,
        )],
    );
    assert_eq!(run_pass(&RemoveUnusedAssignmentsPass, &mut program)?, 1);
    assert_eq!(printed(render_body(&program)), vec!["if (c) ;"]);
    Ok(())
}

#[test]
fn test_replace_context_inside_closures() -> Result<()> {
    let b = AstBuilder::new();
    let closure = b.func_expr(
        &["locals"],
        vec![
            b.var("context", Some(b.ident("locals"))),
            b.append_stmt("html", b.member(b.ident("context"), "title")),
            b.append_stmt("html", b.member(b.ident("locals"), "context")),
            b.append_stmt("html", b.object(vec![("context", b.ident("context"))])),
            b.func_decl("helper", &[], vec![b.ret(Some(b.ident("context")))]),
            b.var(
                "cb",
                Some(b.func_expr(&[], vec![b.ret(Some(b.ident("context")))])),
            ),
        ],
    );
    let mut program = b.program(vec![b.expr_stmt(b.assign(
        AssignmentOperator::Assign,
        b.member(b.ident("module"), "exports"),
        closure,
    ))]);

    assert_eq!(run_pass(&ReplaceContextPass, &mut program)?, 2);
    assert_eq!(
        program.to_string(),
        [
            "module.exports = function(locals) {",
            "var context = locals;",
            "html += self.title;",
            "html += locals.context;",
            "html += { context: self };",
            "function helper() { return context; }",
            "var cb = function() { return context; };",
            "};",
        ]
        .join(" ")
    );
    Ok(())
}

#[test]
fn test_replace_context_skips_declarations_and_bound_parameters() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = b.program(vec![
        b.func_decl(
            "render",
            &["locals"],
            vec![b.var(
                "cb",
                Some(b.func_expr(&[], vec![b.ret(Some(b.ident("context")))])),
            )],
        ),
        b.var(
            "bound",
            Some(b.func_expr(&["context"], vec![b.ret(Some(b.ident("context")))])),
        ),
    ]);
    let before = program.clone();

    assert_eq!(run_pass(&ReplaceContextPass, &mut program)?, 0);
    assert_eq!(program, before);
    Ok(())
}

#[test]
fn test_replace_context_uses_configured_receiver() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = b.program(vec![b.var(
        "cb",
        Some(b.func_expr(&[], vec![b.ret(Some(b.ident("ctx")))])),
    )]);
    let options = OptimizeOptions {
        context_identifier: "ctx".to_string(),
        receiver_identifier: "that".to_string(),
        ..OptimizeOptions::default()
    };
    assert_eq!(run_pass_with(&ReplaceContextPass, &mut program, &options)?, 1);
    assert_eq!(program.to_string(), "var cb = function() { return that; };");
    Ok(())
}

#[test]
fn test_remove_unused_declarators() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![
            b.var_decl(
                VarKind::Var,
                vec![
                    b.declarator("html", Some(b.string(""))),
                    b.declarator("unused", Some(b.number(1.0))),
                ],
            ),
            b.var("tmp", None),
            b.var("used", Some(b.member(b.ident("locals"), "a"))),
            b.append_stmt("html", b.ident("used")),
            b.ret(Some(b.ident("html"))),
        ],
    );

    assert_eq!(run_pass(&RemoveUnusedDeclaratorsPass, &mut program)?, 2);
    assert_eq!(
        printed(render_body(&program)),
        vec![
            "var html = \"\";",
            // the emptied declaration stays
            "var ;",
            "var used = locals.a;",
            "html += used;",
            "return html;",
        ]
    );
    Ok(())
}

#[test]
fn test_declarator_liveness() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![
            b.var("row", Some(b.member(b.ident("locals"), "row"))),
            b.var(
                "cb",
                Some(b.func_expr(&[], vec![b.ret(Some(b.member(b.ident("row"), "id")))])),
            ),
            b.var("label", Some(b.string("x"))),
            b.expr_stmt(b.member(b.ident("locals"), "label")),
            b.for_in(
                b.var_decl(VarKind::Var, vec![b.declarator("key", None)]),
                b.ident("locals"),
                b.block(vec![]),
            ),
            b.ret(Some(b.call(b.ident("cb"), vec![]))),
        ],
    );

    // `label` only shows up as a property name
    assert_eq!(run_pass(&RemoveUnusedDeclaratorsPass, &mut program)?, 1);
    assert_eq!(
        printed(render_body(&program)),
        vec![
            "var row = locals.row;",
            "var cb = function() { return row.id; };",
            "var ;",
            "locals.label;",
            "for (var key in locals) {}",
            "return cb();",
        ]
    );
    Ok(())
}

#[test]
fn test_combine_output_fold_example() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![
            b.append_stmt("html", b.ident("a")),
            b.append_stmt("html", b.ident("b")),
            b.assign_stmt("x", b.number(1.0)),
            b.append_stmt("html", b.ident("c")),
        ],
    );

    assert_eq!(run_pass(&CombineOutputPass, &mut program)?, 1);
    let expected = vec![
        b.append_stmt(
            "html",
            b.binary(BinaryOperator::Add, b.ident("a"), b.ident("b")),
        ),
        b.assign_stmt("x", b.number(1.0)),
        b.append_stmt("html", b.ident("c")),
    ];
    assert_eq!(render_body(&program), expected.as_slice());
    Ok(())
}

#[test]
fn test_combine_output_builds_left_associated_chain() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![b.if_stmt(
            b.ident("show"),
            b.block(vec![
                b.append_stmt("html", b.string("<li>")),
                b.append_stmt("html", b.member(b.ident("locals"), "name")),
                b.append_stmt("html", b.string("</li>")),
            ]),
            None,
        )],
    );
    assert_eq!(run_pass(&CombineOutputPass, &mut program)?, 2);
    assert_eq!(
        printed(render_body(&program)),
        vec![r#"if (show) { html += "<li>" + locals.name + "</li>"; }"#]
    );
    Ok(())
}

#[test]
fn test_combine_output_ignores_other_variables() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![
            b.append_stmt("out", b.ident("a")),
            b.append_stmt("out", b.ident("b")),
            b.append_stmt("html", b.ident("c")),
        ],
    );
    assert_eq!(run_pass(&CombineOutputPass, &mut program)?, 0);
    Ok(())
}

#[test]
fn test_normalize_first_output() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![
            b.var("html", None),
            b.append_stmt("html", b.string("a")),
            b.ret(Some(b.ident("html"))),
        ],
    );

    assert_eq!(run_pass(&NormalizeFirstOutputPass, &mut program)?, 1);
    let expected = render_program(
        &b,
        vec![
            b.var("html", None),
            b.assign_stmt("html", b.string("a")),
            b.ret(Some(b.ident("html"))),
        ],
    );
    assert_eq!(program, expected);

    // the first write is now an assignment, so a second run stops there
    assert_eq!(run_pass(&NormalizeFirstOutputPass, &mut program)?, 0);
    Ok(())
}

#[test]
fn test_normalize_clears_empty_string_seed() -> Result<()> {
    let b = AstBuilder::new();
    let mut program = render_program(
        &b,
        vec![
            b.while_stmt(b.ident("c"), b.block(vec![])),
            b.var("html", Some(b.string(""))),
            b.var("x", Some(b.member(b.ident("locals"), "x"))),
            b.append_stmt("html", b.ident("x")),
            b.append_stmt("html", b.string("!")),
        ],
    );
    assert_eq!(run_pass(&NormalizeFirstOutputPass, &mut program)?, 1);
    assert_eq!(
        printed(render_body(&program)),
        vec![
            "while (c) {}",
            "var html;",
            "var x = locals.x;",
            "html = x;",
            "html += \"!\";",
        ]
    );
    Ok(())
}

#[test]
fn test_normalize_stops_at_boundaries_and_other_uses() -> Result<()> {
    let b = AstBuilder::new();
    let cases = vec![
        // conditional first write
        vec![
            b.var("html", Some(b.string(""))),
            b.if_stmt(
                b.ident("x"),
                b.block(vec![b.append_stmt("html", b.string("a"))]),
                None,
            ),
        ],
        // looped first write
        vec![
            b.var("html", Some(b.string(""))),
            b.for_in(
                b.var_decl(VarKind::Var, vec![b.declarator("k", None)]),
                b.ident("locals"),
                b.block(vec![b.append_stmt("html", b.ident("k"))]),
            ),
            b.append_stmt("html", b.string("a")),
        ],
        // the seed is read first
        vec![
            b.var("html", Some(b.string(""))),
            b.expr_stmt(b.call(b.ident("log"), vec![b.ident("html")])),
            b.append_stmt("html", b.string("a")),
        ],
        // a non-empty seed must survive
        vec![
            b.var("html", Some(b.string("<p>"))),
            b.append_stmt("html", b.string("a")),
        ],
    ];

    for body in cases {
        let mut program = render_program(&b, body);
        let before = program.clone();
        assert_eq!(run_pass(&NormalizeFirstOutputPass, &mut program)?, 0);
        assert_eq!(program, before);
    }
    Ok(())
}
