// rtc_lua/src/lua_host.rs
use rtc_bridge::payload::external_frame::ExternalFrame;
use rtc_bridge::marshal::host_value::HostValue;
use rtc_bridge::host::host::Host;
use crate::lua_constants::*;
use mlua::UserDataMethods;
use mlua::MetaMethod;
use mlua::Function;
use mlua::UserData;
use mlua::Variadic;
use mlua::Value;
use mlua::Lua;

/// Delivers bridge events to Lua functions. Handlers are called as
/// `handler(context, ...)`.
#[derive(Clone)]
pub struct LuaHost {
    lua: Lua,
}

impl LuaHost {
    pub fn new(lua: Lua) -> Self {
        Self { lua }
    }

    pub fn lua(&self) -> &Lua {
        &self.lua
    }
}

impl Host for LuaHost {
    type Function = Function;
    type Context = Value;
    type Error = mlua::Error;

    fn invoke(&self, function: &Function, context: &Value, args: Vec<HostValue>) -> mlua::Result<()> {
        let mut values = Vec::with_capacity(args.len() + 1);
        values.push(context.clone());
        for arg in &args {
            values.push(to_lua_value(&self.lua, arg)?);
        }
        function.call::<()>(Variadic::from(values))
    }
}

/// Converts a marshalled value into its Lua form. Records become tables keyed
/// by field name, sequences become 1-based arrays.
pub fn to_lua_value(lua: &Lua, value: &HostValue) -> mlua::Result<Value> {
    Ok(match value {
        HostValue::Nil => Value::Nil,
        HostValue::Bool(b) => Value::Boolean(*b),
        HostValue::Int(i) => Value::Integer(*i),
        // Lua integers are signed; values past i64::MAX fall back to floats.
        HostValue::UInt(u) => match i64::try_from(*u) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Number(*u as f64),
        },
        HostValue::Float(f) => Value::Number(*f),
        HostValue::Str(s) => Value::String(lua.create_string(s)?),
        HostValue::Seq(items) => {
            let table = lua.create_table_with_capacity(items.len(), 0)?;
            for (i, item) in items.iter().enumerate() {
                table.raw_set(i + 1, to_lua_value(lua, item)?)?;
            }
            Value::Table(table)
        }
        HostValue::Record(fields) => {
            let table = lua.create_table_with_capacity(0, fields.len())?;
            for (name, field) in fields {
                table.raw_set(*name, to_lua_value(lua, field)?)?;
            }
            Value::Table(table)
        }
        HostValue::Bytes(frame) => Value::UserData(lua.create_userdata(LuaFrame(frame.clone()))?),
    })
}

/// Read-only view of an external audio frame. The bytes stay where the
/// engine put them until a script asks for a copy.
pub struct LuaFrame(pub ExternalFrame);

impl UserData for LuaFrame {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method(FRAME_LEN, |_, this, ()| Ok(this.0.len()));
        methods.add_meta_method(MetaMethod::Len, |_, this, ()| Ok(this.0.len()));

        // 1-based, like string.byte.
        methods.add_method(FRAME_BYTE, |_, this, index: usize| {
            Ok(index
                .checked_sub(1)
                .and_then(|i| this.0.as_bytes().get(i))
                .copied())
        });

        methods.add_method(FRAME_TO_STRING, |lua, this, ()| lua.create_string(this.0.as_bytes()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlua::Table;

    #[test]
    fn large_unsigned_values_become_numbers() {
        let lua = Lua::new();
        assert_eq!(to_lua_value(&lua, &HostValue::UInt(7)).unwrap().as_i64(), Some(7));
        let big = to_lua_value(&lua, &HostValue::UInt(u64::MAX)).unwrap();
        assert!(matches!(big, Value::Number(_)));
    }

    #[test]
    fn records_and_sequences_become_tables() {
        let lua = Lua::new();
        let value = HostValue::Seq(vec![HostValue::Record(vec![
            ("uid", HostValue::UInt(3)),
            ("codec_name", HostValue::Str("H264".into())),
        ])]);

        let Value::Table(seq) = to_lua_value(&lua, &value).unwrap() else {
            panic!("expected a table");
        };
        assert_eq!(seq.raw_len(), 1);
        let record: Table = seq.get(1).unwrap();
        assert_eq!(record.get::<u64>("uid").unwrap(), 3);
        assert_eq!(record.get::<String>("codec_name").unwrap(), "H264");
    }

    #[test]
    fn frames_are_exposed_as_userdata() {
        let lua = Lua::new();
        let frame = ExternalFrame::new(vec![10u8, 20, 30]);
        let value = to_lua_value(&lua, &HostValue::Bytes(frame)).unwrap();
        lua.globals().set("frame", value).unwrap();

        let (len, second, missing): (usize, u8, Option<u8>) = lua
            .load("return #frame, frame:byte(2), frame:byte(9)")
            .eval()
            .unwrap();
        assert_eq!((len, second, missing), (3, 20, None));
    }

    #[test]
    fn context_is_passed_first() {
        let lua = Lua::new();
        let host = LuaHost::new(lua.clone());
        let handler: Function = lua
            .load("return function(ctx, a, b) seen = ctx.name .. ':' .. a .. ':' .. b end")
            .eval()
            .unwrap();
        let ctx = lua.create_table().unwrap();
        ctx.set("name", "obj").unwrap();

        host.invoke(&handler, &Value::Table(ctx), vec![HostValue::UInt(1), HostValue::Str("x".into())])
            .unwrap();
        assert_eq!(lua.globals().get::<String>("seen").unwrap(), "obj:1:x");
    }
}
