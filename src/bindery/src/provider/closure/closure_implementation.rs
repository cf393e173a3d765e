use std::error::Error;

use crate::container::injector::InjectorError;
use crate::container::Managed;
use crate::provider::closure::Closure;
use crate::provider::{Parameter, Provider};

impl<F, T, E> Closure<()> for F
where
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
    T: Managed,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    type Output = T;

    type Error = E;

    fn parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    fn run(
        &self,
        _provider: &Provider<'_>,
    ) -> Result<Result<Self::Output, Self::Error>, InjectorError> {
        Ok(self())
    }
}

macro_rules! for_all_tuples {
    ($implementation:ident) => {
        $implementation!(D1);
        $implementation!(D1, D2);
        $implementation!(D1, D2, D3);
        $implementation!(D1, D2, D3, D4);
        $implementation!(D1, D2, D3, D4, D5);
        $implementation!(D1, D2, D3, D4, D5, D6);
        $implementation!(D1, D2, D3, D4, D5, D6, D7);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14, D15);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14, D15, D16);
    };
}

macro_rules! impl_closure {
    ($($dep:ident),*) => {
        #[allow(non_snake_case)]
        impl<F, T, E, $($dep,)*> Closure<($($dep,)*)> for F
        where
            F: Fn($($dep,)*) -> Result<T, E> + Send + Sync + 'static,
            T: Managed,
            E: Into<Box<dyn Error + Send + Sync>>,
            $($dep: Managed,)*
        {
            type Output = T;

            type Error = E;

            fn parameters(&self) -> Vec<Parameter> {
                vec![$(Parameter::of::<$dep>(),)*]
            }

            fn run(
                &self,
                provider: &Provider<'_>,
            ) -> Result<Result<Self::Output, Self::Error>, InjectorError> {
                $(
                    let $dep = provider.get::<$dep>()?;
                )*
                Ok(self($($dep,)*))
            }
        }
    };
}

for_all_tuples!(impl_closure);

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use crate::container::injector::{CallContext, MockInjector};
    use crate::key::Key;

    use super::*;

    #[test]
    fn closure_parameters_follow_argument_order() {
        let closure = |_: i32, _: String, _: u8| Ok::<_, Infallible>("str");

        assert_eq!(
            closure.parameters(),
            vec![
                Parameter::of::<i32>(),
                Parameter::of::<String>(),
                Parameter::of::<u8>(),
            ]
        );
        assert!(Closure::<()>::parameters(&|| Ok::<_, Infallible>(0u8)).is_empty());
    }

    #[test]
    fn closure_run_fetches_every_argument() {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get_dependency()
            .returning(|key, _| {
                if *key == Key::of::<i32>() {
                    Ok(Box::new(40i32))
                } else {
                    Ok(Box::new(2i64))
                }
            });

        let key = Key::of::<i64>();
        let context = CallContext::new(&key);
        let provider = Provider::new(&injector, &context);

        let closure = |a: i32, b: i64| Ok::<_, Infallible>(i64::from(a) + b);
        assert_eq!(closure.run(&provider).unwrap().unwrap(), 42);
    }
}
