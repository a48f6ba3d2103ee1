use std::sync::Arc;

use dynabean::{
    BeanError, BeanOptions, Contract, DefinitionBuilder, DefinitionRegistry, DynaBean,
    InterfaceDefinition, MethodSignature, PrimitiveType, Type, Value,
};

fn int() -> Type {
    Type::Primitive(PrimitiveType::Int)
}

fn person_contract() -> Contract {
    Contract::new("Person")
        .method(MethodSignature::getter("getName", Type::String))
        .method(MethodSignature::setter("setName", Type::String))
        .method(MethodSignature::getter("getAge", int()))
        .method(MethodSignature::setter("setAge", int()))
        .method(
            MethodSignature::new("greet")
                .returns(Type::String)
                .default_body(|this, _| {
                    let name: Option<String> = this.call("getName", &[])?;
                    Ok(Value::from(format!("Hello, {}", name.unwrap_or_default())))
                }),
        )
}

fn person() -> (Arc<InterfaceDefinition>, DynaBean) {
    let definition = Arc::new(InterfaceDefinition::build(&person_contract()));
    let bean = DynaBean::new(Arc::clone(&definition));
    (definition, bean)
}

#[test]
fn test_person_scenario() {
    let (_, p) = person();

    assert_eq!(p.invoke("getAge", &[]).unwrap(), Value::Int(0));

    p.invoke("setName", &[Value::from("Ann")]).unwrap();
    assert_eq!(p.invoke("greet", &[]).unwrap(), Value::from("Hello, Ann"));

    p.invoke("setName", &[Value::Null]).unwrap();
    assert!(p.invoke("getName", &[]).unwrap().is_null());

    let err = p.invoke("setAge", &[Value::Double(3.5)]).unwrap_err();
    assert!(matches!(err, BeanError::TypeMismatch { .. }));
    assert_eq!(err.to_string(), "3.5 is not an instance of type: int");
}

#[test]
fn test_failed_setter_keeps_prior_value() {
    let (_, p) = person();
    p.invoke("setAge", &[Value::Int(41)]).unwrap();

    assert!(p.invoke("setAge", &[Value::from("old")]).is_err());
    assert!(p.invoke("setAge", &[Value::Null]).is_err());
    assert!(p.invoke("setAge", &[Value::Long(41)]).is_err());

    assert_eq!(p.invoke("getAge", &[]).unwrap(), Value::Int(41));
}

#[test]
fn test_argument_count_errors() {
    let (_, p) = person();

    let err = p.invoke("getAge", &[Value::Int(1)]).unwrap_err();
    assert_eq!(err.to_string(), "Expected 0 argument(s), got: [1]");

    let err = p.invoke("setAge", &[]).unwrap_err();
    assert_eq!(err.to_string(), "Expected 1 argument(s), got: []");
}

#[test]
fn test_equality_ignores_assignment_order() {
    let (definition, a) = person();
    let b = DynaBean::new(Arc::clone(&definition));

    a.invoke("setName", &[Value::from("Ann")]).unwrap();
    a.invoke("setAge", &[Value::Int(30)]).unwrap();

    b.invoke("setAge", &[Value::Int(30)]).unwrap();
    b.invoke("setName", &[Value::from("Ann")]).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());
    assert_eq!(
        a.invoke("equals", &[Value::Bean(b.clone())]).unwrap(),
        Value::Bool(true)
    );

    b.invoke("setAge", &[Value::Int(31)]).unwrap();
    assert_ne!(a, b);
    assert_eq!(
        a.invoke("equals", &[Value::Bean(b.clone())]).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_different_contracts_are_not_equal() {
    let (_, a) = person();
    let other = Arc::new(InterfaceDefinition::build(&person_contract()));
    let b = DynaBean::new(other);
    assert_ne!(a, b);
}

#[test]
fn test_clone_is_equal_but_distinct() {
    let (_, p) = person();
    p.invoke("setName", &[Value::from("Ann")]).unwrap();

    let copy = p.invoke("clone", &[]).unwrap();
    let copy = copy.as_bean().unwrap();

    assert_eq!(copy, &p);
    assert!(!copy.ptr_eq(&p));

    copy.invoke("setName", &[Value::from("Bea")]).unwrap();
    assert_eq!(p.invoke("getName", &[]).unwrap(), Value::from("Ann"));
}

#[test]
fn test_to_string_names_contract() {
    let (_, p) = person();
    assert_eq!(p.to_string(), "DynaBean(type=Person)");
    assert_eq!(
        p.invoke("toString", &[]).unwrap(),
        Value::from("DynaBean(type=Person)")
    );
}

#[test]
fn test_unmapped_method_is_unsupported() {
    let contract = person_contract().method(MethodSignature::new("describe").returns(Type::String));
    let bean = DynaBean::new(Arc::new(InterfaceDefinition::build(&contract)));

    match bean.invoke("describe", &[]) {
        Err(BeanError::UnsupportedOperation { method }) => assert_eq!(method, "Person.describe/0"),
        other => panic!("expected unsupported operation, got {other:?}"),
    }
}

#[test]
fn test_sub_contract_overrides_parent() {
    let named = Arc::new(
        Contract::new("Named")
            .method(MethodSignature::getter("getName", Type::String))
            .method(MethodSignature::setter("setName", Type::String))
            .method(
                MethodSignature::new("describe")
                    .returns(Type::String)
                    .default_body(|_, _| Ok(Value::from("named"))),
            ),
    );
    let employee = Contract::new("Employee")
        .extends(&named)
        .method(MethodSignature::getter("getSalary", Type::Boxed(PrimitiveType::Long)))
        .method(
            MethodSignature::new("describe")
                .returns(Type::String)
                .default_body(|this, _| {
                    let name: Option<String> = this.call("getName", &[])?;
                    Ok(Value::from(format!("employee {}", name.unwrap_or_default())))
                }),
        );

    let parent = InterfaceDefinition::build(&named);
    let definition = DefinitionBuilder::new(&employee).merge(&parent).finalize();
    let bean = DynaBean::new(Arc::new(definition));

    bean.invoke("setName", &[Value::from("Cy")]).unwrap();
    assert_eq!(bean.invoke("describe", &[]).unwrap(), Value::from("employee Cy"));
    assert!(bean.invoke("getSalary", &[]).unwrap().is_null());
    assert!(bean.is_instance_of("Named"));
    assert!(bean.is_instance_of("Employee"));
}

#[test]
fn test_bean_typed_property_accepts_sub_contract() {
    let registry = DefinitionRegistry::new();
    let named = Arc::new(Contract::new("Named").method(MethodSignature::getter("getName", Type::String)));
    let employee = Contract::new("Employee").extends(&named);
    let team = Contract::new("Team")
        .method(MethodSignature::getter("getLead", Type::Bean("Named".to_string())))
        .method(MethodSignature::setter("setLead", Type::Bean("Named".to_string())));

    let lead = registry.create(&employee);
    let t = registry.create(&team);
    t.invoke("setLead", &[Value::Bean(lead.clone())]).unwrap();
    assert_eq!(t.call::<dynabean::DynaBean>("getLead", &[]).unwrap(), lead);

    let stranger = registry.create(&Contract::new("Stranger"));
    assert!(t.invoke("setLead", &[Value::Bean(stranger)]).is_err());
}

#[test]
fn test_overloads_dispatch_by_argument_type() {
    let contract = Contract::new("Cell")
        .method(MethodSignature::getter("getValue", Type::Any))
        .method(MethodSignature::setter("setValue", Type::String))
        .method(MethodSignature::setter("setValue", int()));
    let bean = DefinitionRegistry::new().create(&contract);

    bean.invoke("setValue", &[Value::Int(1)]).unwrap();
    assert_eq!(bean.invoke("getValue", &[]).unwrap(), Value::Int(1));

    bean.invoke("setValue", &[Value::from("one")]).unwrap();
    assert_eq!(bean.invoke("getValue", &[]).unwrap(), Value::from("one"));

    let err = bean.invoke("setValue", &[Value::Bool(true)]).unwrap_err();
    assert!(matches!(err, BeanError::TypeMismatch { .. }));
    assert_eq!(bean.invoke("getValue", &[]).unwrap(), Value::from("one"));
}

#[test]
fn test_instance_of_contract_uses_identity() {
    let registry = DefinitionRegistry::new();
    let named = Arc::new(Contract::new("Named").method(MethodSignature::getter("getName", Type::String)));
    let impostor = Contract::new("Named");
    let employee = Contract::new("Employee").extends(&named);

    let bean = registry.create(&employee);
    assert!(bean.is_instance_of_contract(&named));
    assert!(bean.is_instance_of_contract(&employee));
    assert!(!bean.is_instance_of_contract(&impostor));
}

#[test]
fn test_extended_clone_is_a_distinct_contract() {
    let registry = DefinitionRegistry::new();
    let base = Contract::new("Base").method(MethodSignature::getter("getId", Type::String));
    let extended = base.clone().method(MethodSignature::getter("getExtra", Type::String));

    let base_bean = registry.create(&base);
    let extended_bean = registry.create(&extended);

    assert!(extended_bean.invoke("getExtra", &[]).unwrap().is_null());
    assert_ne!(base_bean, extended_bean);
    assert_ne!(base_bean.definition(), extended_bean.definition());
}

#[test]
fn test_degraded_default_methods_are_unsupported() {
    let contract = Contract::new("Sealed")
        .method(MethodSignature::getter("getId", Type::String))
        .method(MethodSignature::new("secret").inaccessible_default())
        .method(MethodSignature::new("open").default_body(|_, _| Ok(Value::Bool(true))));

    let registry = DefinitionRegistry::with_options(BeanOptions::default().without_default_methods());
    let bean = registry.create(&contract);

    assert!(bean.invoke("getId", &[]).unwrap().is_null());
    assert!(matches!(
        bean.invoke("secret", &[]),
        Err(BeanError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        bean.invoke("open", &[]),
        Err(BeanError::UnsupportedOperation { .. })
    ));
}

#[test]
fn test_pass_through_errors_propagate_verbatim() {
    let contract = Contract::new("Strict").method(
        MethodSignature::new("validate").default_body(|_, args| {
            Err(BeanError::Custom(format!("invalid: {}", args.len())))
        }),
    );
    let bean = DefinitionRegistry::new().create(&contract);

    let err = bean.invoke("validate", &[Value::Int(1), Value::Int(2)]).unwrap_err();
    assert_eq!(err.to_string(), "invalid: 2");
}

#[test]
fn test_shared_definition_across_threads() {
    let definition = Arc::new(InterfaceDefinition::build(&person_contract()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let definition = Arc::clone(&definition);
            std::thread::spawn(move || {
                let bean = DynaBean::new(definition);
                bean.invoke("setAge", &[Value::Int(i)]).unwrap();
                bean.call::<i32>("getAge", &[]).unwrap()
            })
        })
        .collect();

    let ages: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ages, vec![0, 1, 2, 3]);
}
