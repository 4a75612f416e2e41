//! Tree-walking evaluator.
//!
//! Runs a program that already passed [`xenon_check::check`]. The checker's
//! [`ClassRegistry`] supplies field slots, declared types and method indices;
//! the AST supplies initializers and method bodies.
//!
//! Static guarantees are re-checked cheaply at run time (dynamic type of
//! stored values, bound names, object receivers) and reported as
//! [`RuntimeError`]s rather than panics.

use crate::config::Config;
use crate::env::Environment;
use crate::error::{RuntimeError, RuntimeResult};
use crate::value::{Object, ObjectRef, Value};
use fxhash::FxHashMap;
use std::io::Write;
use std::rc::Rc;
use xenon_check::{ClassInfo, ClassRegistry, FieldInfo, Ty};
use xenon_log::{debug, trace};
use xenon_mem::{StringInterner, Symbol};
use xenon_syntax::ast::{
    AssignTarget, BinaryOp, Block, ClassDef, Expr, Program, Stmt, UnaryOp,
};
use xenon_syntax::{Span, Spanned};

/// How a statement finished.
#[derive(Debug)]
enum Flow {
    Normal,
    Return(Value),
}

/// Evaluates a checked program, writing `print` output to `out`.
pub struct Interpreter<'a, W: Write> {
    program: &'a Program,
    registry: &'a ClassRegistry,
    interner: &'a StringInterner,
    classes: FxHashMap<Symbol, &'a ClassDef>,
    env: Environment,
    out: W,
    config: Config,
}

impl<'a, W: Write> Interpreter<'a, W> {
    /// Creates an interpreter for `program`.
    ///
    /// `registry` must be the result of checking `program` with `interner`.
    pub fn new(
        program: &'a Program,
        registry: &'a ClassRegistry,
        interner: &'a StringInterner,
        out: W,
        config: Config,
    ) -> Self {
        let classes = program
            .classes
            .iter()
            .map(|class| (class.name, class))
            .collect();

        Self {
            program,
            registry,
            interner,
            classes,
            env: Environment::new(),
            out,
            config,
        }
    }

    /// Runs the top-level statements in source order.
    ///
    /// # Errors
    ///
    /// The first [`RuntimeError`]; output written before it is kept.
    pub fn run(&mut self) -> RuntimeResult<()> {
        let program = self.program;
        debug!("running {} top-level statements", program.statements.len());

        for stmt in &program.statements {
            self.exec_stmt(stmt)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &'a Stmt) -> RuntimeResult<Flow> {
        match stmt {
            Stmt::VarDecl { name, ty, init, .. } => {
                let value = self.eval(init)?;
                let ty = Ty::from_kind(ty.kind);
                self.expect_value(&value, ty, init.span())?;
                self.env.current_mut().define(*name, ty, value);
            }

            Stmt::Assign { target, value, .. } => self.exec_assign(target, value)?,

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Void,
                };
                return Ok(Flow::Return(value));
            }

            Stmt::Expr { expr, .. } => {
                self.eval(expr)?;
            }

            Stmt::Print { value, .. } => {
                let value = self.eval(value)?;
                writeln!(self.out, "{value}")?;
            }

            Stmt::If {
                cond,
                then_block,
                else_block,
                ..
            } => {
                if self.eval_bool(cond)? {
                    return self.exec_block(then_block);
                } else if let Some(else_block) = else_block {
                    return self.exec_block(else_block);
                }
            }

            Stmt::While { cond, body, .. } => {
                while self.eval_bool(cond)? {
                    if let Flow::Return(value) = self.exec_block(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
            }

            Stmt::For {
                init,
                cond,
                step,
                body,
                ..
            } => {
                self.env.new_scope();
                let flow = self.exec_for(init, cond, step, body);
                self.env.pop_scope();
                return flow;
            }
        }

        Ok(Flow::Normal)
    }

    /// Runs a `for` loop inside the scope holding its init variable.
    fn exec_for(
        &mut self,
        init: &'a Stmt,
        cond: &'a Expr,
        step: &'a Stmt,
        body: &'a Block,
    ) -> RuntimeResult<Flow> {
        self.exec_stmt(init)?;
        while self.eval_bool(cond)? {
            if let Flow::Return(value) = self.exec_block(body)? {
                return Ok(Flow::Return(value));
            }
            self.exec_stmt(step)?;
        }
        Ok(Flow::Normal)
    }

    /// Runs `stmts` in the current scope, stopping at the first `return`.
    fn exec_stmts(&mut self, stmts: &'a [Stmt]) -> RuntimeResult<Flow> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Runs a nested block in its own scope.
    fn exec_block(&mut self, block: &'a Block) -> RuntimeResult<Flow> {
        self.env.new_scope();
        let flow = self.exec_stmts(&block.stmts);
        self.env.pop_scope();
        flow
    }

    fn exec_assign(&mut self, target: &'a AssignTarget, value: &'a Expr) -> RuntimeResult<()> {
        match target {
            AssignTarget::Variable { name, span } => {
                let value_span = value.span();
                let value = self.eval(value)?;

                if let Some(binding) = self.env.current().lookup(*name) {
                    let ty = binding.ty;
                    self.expect_value(&value, ty, value_span)?;
                    if let Some(binding) = self.env.current_mut().lookup_mut(*name) {
                        binding.value = value;
                    }
                    return Ok(());
                }

                let receiver = self.receiver(*span)?;
                self.store_field(&receiver, *name, value, *span, value_span)
            }

            AssignTarget::Field {
                receiver,
                field,
                span,
            } => {
                let receiver = self.eval_object(receiver)?;
                let value_span = value.span();
                let value = self.eval(value)?;
                self.store_field(&receiver, *field, value, *span, value_span)
            }
        }
    }

    fn eval(&mut self, expr: &'a Expr) -> RuntimeResult<Value> {
        match expr {
            Expr::IntLiteral { value, .. } => Ok(Value::Int(*value)),
            Expr::BoolLiteral { value, .. } => Ok(Value::Bool(*value)),
            Expr::StrLiteral { value, .. } => Ok(Value::Str(
                self.interner.resolve_rc(*value).unwrap_or_else(|| Rc::from("")),
            )),

            Expr::Identifier { name, span } => self.read_name(*name, *span),

            Expr::FieldAccess {
                receiver,
                field,
                span,
            } => {
                let receiver = self.eval_object(receiver)?;
                self.load_field(&receiver, *field, *span)
            }

            Expr::MethodCall {
                receiver,
                method,
                args,
                span,
            } => {
                let receiver = match receiver {
                    Some(receiver) => self.eval_object(receiver)?,
                    None => self.receiver(*span)?,
                };
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<RuntimeResult<Vec<_>>>()?;
                self.call_method(&receiver, *method, args, *span)
            }

            Expr::New { class, span } => self.instantiate(*class, *span),

            Expr::Unary { op, operand, span } => {
                let value = self.eval(operand)?;
                match (op, value) {
                    (UnaryOp::Neg, Value::Int(n)) => {
                        n.checked_neg().map(Value::Int).ok_or_else(|| {
                            RuntimeError::Overflow {
                                op: op.to_string(),
                                span: *span,
                            }
                        })
                    }
                    (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
                    (UnaryOp::Neg, other) => Err(mismatch(Ty::Int, &other, *span)),
                    (UnaryOp::Not, other) => Err(mismatch(Ty::Bool, &other, *span)),
                }
            }

            Expr::Binary {
                left,
                op: BinaryOp::And,
                right,
                ..
            } => Ok(Value::Bool(self.eval_bool(left)? && self.eval_bool(right)?)),

            Expr::Binary {
                left,
                op: BinaryOp::Or,
                right,
                ..
            } => Ok(Value::Bool(self.eval_bool(left)? || self.eval_bool(right)?)),

            Expr::Binary {
                left,
                op,
                right,
                span,
            } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary_op(*op, left, right, *span)
            }
        }
    }

    fn eval_bool(&mut self, expr: &'a Expr) -> RuntimeResult<bool> {
        match self.eval(expr)? {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch(Ty::Bool, &other, expr.span())),
        }
    }

    fn eval_object(&mut self, expr: &'a Expr) -> RuntimeResult<ObjectRef> {
        match self.eval(expr)? {
            Value::Object(obj) => Ok(obj),
            _ => Err(RuntimeError::NullReceiver { span: expr.span() }),
        }
    }

    /// Bare name: local or parameter, then field of the receiver.
    fn read_name(&self, name: Symbol, span: Span) -> RuntimeResult<Value> {
        if let Some(binding) = self.env.current().lookup(name) {
            return Ok(binding.value.clone());
        }

        match self.env.current().receiver() {
            Some(receiver) => self.load_field(receiver, name, span),
            None => Err(RuntimeError::UnboundName {
                name: self.name(name),
                span,
            }),
        }
    }

    fn receiver(&self, span: Span) -> RuntimeResult<ObjectRef> {
        self.env
            .current()
            .receiver()
            .cloned()
            .ok_or(RuntimeError::NullReceiver { span })
    }

    fn load_field(&self, obj: &ObjectRef, field: Symbol, span: Span) -> RuntimeResult<Value> {
        let class = obj.borrow().class;
        let slot = self.field_info(class, field, span)?.slot;

        let object = obj.borrow();
        object
            .fields
            .get(slot)
            .cloned()
            .flatten()
            .ok_or_else(|| RuntimeError::UninitializedField {
                class: object.class_name.to_string(),
                field: self.name(field),
                span,
            })
    }

    fn store_field(
        &self,
        obj: &ObjectRef,
        field: Symbol,
        value: Value,
        span: Span,
        value_span: Span,
    ) -> RuntimeResult<()> {
        let class = obj.borrow().class;
        let info = self.field_info(class, field, span)?;
        self.expect_value(&value, info.ty, value_span)?;

        match obj.borrow_mut().fields.get_mut(info.slot) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(RuntimeError::MissingDefinition {
                what: "field",
                name: self.name(field),
                span,
            }),
        }
    }

    /// `new C()`: allocate, then run field initializers in declaration order
    /// with the new object as receiver.
    fn instantiate(&mut self, class: Symbol, span: Span) -> RuntimeResult<Value> {
        let info = self.class_info(class, span)?;
        let def = self.class_def(class, span)?;
        let class_name = self
            .interner
            .resolve_rc(class)
            .unwrap_or_else(|| Rc::from("<unknown>"));
        let obj = Object::new(class, class_name, info.field_count()).into_ref();

        self.enter(Some(obj.clone()), span)?;
        let result = self.init_fields(&obj, info, def);
        self.env.pop_frame();
        result?;

        trace!("new {}", self.name(class));
        Ok(Value::Object(obj))
    }

    fn init_fields(
        &mut self,
        obj: &ObjectRef,
        info: &'a ClassInfo,
        def: &'a ClassDef,
    ) -> RuntimeResult<()> {
        for (field, slot_info) in def.fields.iter().zip(&info.fields) {
            let value = self.eval(&field.init)?;
            self.expect_value(&value, slot_info.ty, field.init.span())?;
            if let Some(slot) = obj.borrow_mut().fields.get_mut(slot_info.slot) {
                *slot = Some(value);
            }
        }
        Ok(())
    }

    /// Calls `method` on `receiver` with already evaluated arguments.
    fn call_method(
        &mut self,
        receiver: &ObjectRef,
        method: Symbol,
        args: Vec<Value>,
        span: Span,
    ) -> RuntimeResult<Value> {
        let class = receiver.borrow().class;
        let info = self.class_info(class, span)?;
        let Some(method_info) = info.method(method) else {
            return Err(RuntimeError::MissingDefinition {
                what: "method",
                name: self.name(method),
                span,
            });
        };
        let def = self.class_def(class, span)?;
        let Some(method_def) = def.methods.get(method_info.index) else {
            return Err(RuntimeError::MissingDefinition {
                what: "method",
                name: self.name(method),
                span,
            });
        };

        trace!(
            "call {}.{} (depth {})",
            self.name(class),
            self.name(method),
            self.env.depth() + 1
        );

        self.enter(Some(receiver.clone()), span)?;
        let result = self.run_method(&method_info.params, args, &method_def.body.stmts, span);
        self.env.pop_frame();

        let value = match result? {
            Flow::Return(value) => value,
            Flow::Normal => Value::Void,
        };
        self.expect_value(&value, method_info.return_ty, span)?;
        Ok(value)
    }

    /// Binds parameters and runs the body; both share the outermost scope.
    fn run_method(
        &mut self,
        params: &[(Symbol, Ty)],
        args: Vec<Value>,
        body: &'a [Stmt],
        span: Span,
    ) -> RuntimeResult<Flow> {
        for (&(name, ty), value) in params.iter().zip(args) {
            self.expect_value(&value, ty, span)?;
            self.env.current_mut().define(name, ty, value);
        }
        self.exec_stmts(body)
    }

    /// Pushes a frame, enforcing the call depth limit.
    fn enter(&mut self, receiver: Option<ObjectRef>, span: Span) -> RuntimeResult<()> {
        let limit = self.config.call_limit();
        if self.env.depth() >= limit {
            return Err(RuntimeError::CallDepthExceeded {
                limit,
                span,
            });
        }
        self.env.push_frame(receiver);
        Ok(())
    }

    fn class_info(&self, class: Symbol, span: Span) -> RuntimeResult<&'a ClassInfo> {
        let registry = self.registry;
        registry
            .lookup_class(class)
            .ok_or_else(|| RuntimeError::MissingDefinition {
                what: "class",
                name: self.name(class),
                span,
            })
    }

    fn class_def(&self, class: Symbol, span: Span) -> RuntimeResult<&'a ClassDef> {
        self.classes
            .get(&class)
            .copied()
            .ok_or_else(|| RuntimeError::MissingDefinition {
                what: "class",
                name: self.name(class),
                span,
            })
    }

    fn field_info(
        &self,
        class: Symbol,
        field: Symbol,
        span: Span,
    ) -> RuntimeResult<&'a FieldInfo> {
        self.class_info(class, span)?
            .field(field)
            .ok_or_else(|| RuntimeError::MissingDefinition {
                what: "field",
                name: self.name(field),
                span,
            })
    }

    fn expect_value(&self, value: &Value, ty: Ty, span: Span) -> RuntimeResult<()> {
        if value.matches(ty) {
            Ok(())
        } else {
            Err(RuntimeError::TypeMismatch {
                expected: ty.display(self.interner).to_string(),
                found: value.type_name(),
                span,
            })
        }
    }

    fn name(&self, sym: Symbol) -> String {
        self.interner.resolve(sym).unwrap_or("<unknown>").to_string()
    }
}

fn mismatch(expected: Ty, found: &Value, span: Span) -> RuntimeError {
    let expected = match expected {
        Ty::Int => "int",
        Ty::Bool => "bool",
        Ty::Str => "string",
        Ty::Void => "void",
        Ty::Class(_) => "object",
    };
    RuntimeError::TypeMismatch {
        expected: expected.to_string(),
        found: found.type_name(),
        span,
    }
}

/// Applies a non-short-circuit binary operator.
fn binary_op(op: BinaryOp, left: Value, right: Value, span: Span) -> RuntimeResult<Value> {
    let overflow = || RuntimeError::Overflow {
        op: op.to_string(),
        span,
    };

    match (op, left, right) {
        (BinaryOp::Add, Value::Int(a), Value::Int(b)) => {
            a.checked_add(b).map(Value::Int).ok_or_else(overflow)
        }
        (BinaryOp::Add, left @ Value::Str(_), right)
        | (BinaryOp::Add, left, right @ Value::Str(_)) => {
            Ok(Value::Str(Rc::from(format!("{left}{right}"))))
        }
        (BinaryOp::Sub, Value::Int(a), Value::Int(b)) => {
            a.checked_sub(b).map(Value::Int).ok_or_else(overflow)
        }
        (BinaryOp::Mul, Value::Int(a), Value::Int(b)) => {
            a.checked_mul(b).map(Value::Int).ok_or_else(overflow)
        }
        (BinaryOp::Div, Value::Int(_), Value::Int(0)) => {
            Err(RuntimeError::DivisionByZero { span })
        }
        (BinaryOp::Div, Value::Int(a), Value::Int(b)) => {
            a.checked_div(b).map(Value::Int).ok_or_else(overflow)
        }
        (BinaryOp::Mod, Value::Int(_), Value::Int(0)) => Err(RuntimeError::ModuloByZero { span }),
        (BinaryOp::Mod, Value::Int(a), Value::Int(b)) => {
            a.checked_rem(b).map(Value::Int).ok_or_else(overflow)
        }
        (BinaryOp::Lt, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a < b)),
        (BinaryOp::Gt, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a > b)),
        (BinaryOp::Le, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a <= b)),
        (BinaryOp::Ge, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a >= b)),
        (BinaryOp::Eq, left, right) => Ok(Value::Bool(left == right)),
        (BinaryOp::Ne, left, right) => Ok(Value::Bool(left != right)),
        (_, left, right) => Err(RuntimeError::TypeMismatch {
            expected: format!("operands for '{op}'"),
            found: format!("{} and {}", left.type_name(), right.type_name()),
            span,
        }),
    }
}
